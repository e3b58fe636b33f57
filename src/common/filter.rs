// src/common/filter.rs

//! Projeção filtrada de uma lista: busca textual livre + filtros categóricos.
//!
//! A busca é uma verificação de substring sem diferenciar maiúsculas nos campos
//! declarados por [`Searchable`]. Cada filtro é uma igualdade exata e todos são
//! combinados com E (nunca OU). Busca vazia casa com tudo.

use uuid::Uuid;

pub trait Searchable {
    /// Campos textuais consultados pela busca livre.
    fn search_fields(&self) -> Vec<&str>;

    /// Id pesquisável (colar o id na busca encontra o registro).
    fn search_id(&self) -> Option<Uuid> {
        None
    }
}

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;

pub struct Projection<'a, T> {
    needle: Option<String>,
    predicates: Vec<Predicate<'a, T>>,
}

impl<'a, T: Searchable> Projection<'a, T> {
    pub fn new(search: Option<&str>) -> Self {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Self { needle, predicates: Vec::new() }
    }

    /// Filtro de igualdade. `None` (nenhuma opção selecionada) não restringe nada.
    pub fn filter_eq<V, F>(mut self, selected: Option<V>, field: F) -> Self
    where
        V: PartialEq + Send + Sync + 'a,
        F: Fn(&T) -> V + Send + Sync + 'a,
    {
        if let Some(wanted) = selected {
            self.predicates.push(Box::new(move |record: &T| field(record) == wanted));
        }
        self
    }

    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn matches(&self, record: &T) -> bool {
        let text_ok = match &self.needle {
            None => true,
            Some(needle) => {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle.as_str()))
                    || record
                        .search_id()
                        .is_some_and(|id| id.to_string().contains(needle.as_str()))
            }
        };
        text_ok && self.predicates.iter().all(|p| p(record))
    }

    /// Aplica a projeção preservando a ordem original.
    pub fn apply<'r, I>(&self, records: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'r T>,
        T: Clone + 'r,
    {
        records.into_iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        city: String,
        kind: u8,
        active: bool,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.city.as_str()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Guangzhou Hub".into(), city: "Guangzhou".into(), kind: 1, active: true },
            Row { name: "Douala Port".into(), city: "Douala".into(), kind: 2, active: true },
            Row { name: "Kinshasa Depot".into(), city: "Kinshasa".into(), kind: 1, active: false },
            Row { name: "Yiwu Market".into(), city: "Yiwu".into(), kind: 2, active: false },
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let data = rows();
        let result = Projection::new(Some("  DOUAL ")).apply(&data);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Douala");

        for s in ["hub", "a", "ZZZ", "port"] {
            let needle = s.to_lowercase();
            for r in Projection::new(Some(s)).apply(&data) {
                assert!(r.search_fields().iter().any(|f| f.to_lowercase().contains(&needle)));
            }
        }
    }

    #[test]
    fn empty_search_matches_everything() {
        let data = rows();
        assert_eq!(Projection::new(None).apply(&data), data);
        assert_eq!(Projection::new(Some("   ")).apply(&data), data);
    }

    #[test]
    fn filters_are_intersected() {
        let data = rows();
        let by_kind: Vec<Row> = Projection::new(None).filter_eq(Some(1u8), |r: &Row| r.kind).apply(&data);
        let by_active: Vec<Row> = Projection::new(None).filter_eq(Some(true), |r: &Row| r.active).apply(&data);
        let both: Vec<Row> = Projection::new(None)
            .filter_eq(Some(1u8), |r: &Row| r.kind)
            .filter_eq(Some(true), |r: &Row| r.active)
            .apply(&data);

        let expected: Vec<Row> = by_kind.iter().filter(|r| by_active.contains(r)).cloned().collect();
        assert_eq!(both, expected);
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn unselected_filter_does_not_restrict() {
        let data = rows();
        let result = Projection::new(None).filter_eq(None::<u8>, |r: &Row| r.kind).apply(&data);
        assert_eq!(result.len(), data.len());
    }
}
