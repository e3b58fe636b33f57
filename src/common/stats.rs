// src/common/stats.rs

// Derivações puras usadas pelos cards de resumo. Tudo é recalculado a cada requisição.

use rust_decimal::{prelude::ToPrimitive, Decimal};

/// Percentual com uma casa decimal; `0.0` quando o total é zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 * 100.0 / whole as f64)
}

pub fn decimal_percentage(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    round1((part * Decimal::from(100) / whole).to_f64().unwrap_or(0.0))
}

pub fn count_where<'a, T: 'a, I, P>(records: I, predicate: P) -> usize
where
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    records.into_iter().filter(|r| predicate(r)).count()
}

pub fn sum_decimal<'a, T: 'a, I, F>(records: I, field: F) -> Decimal
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Decimal,
{
    records.into_iter().map(field).sum()
}

/// Média com uma casa decimal; `None` quando não há amostras.
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(round1(sum / n as f64)) }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_guards_against_empty_sets() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(245, 1000), 24.5);
    }

    #[test]
    fn decimal_helpers() {
        let values = [Decimal::new(1050, 2), Decimal::new(2000, 2)];
        assert_eq!(sum_decimal(&values, |d| *d), Decimal::new(3050, 2));
        assert_eq!(decimal_percentage(Decimal::from(1), Decimal::from(4)), 25.0);
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average(Vec::<f64>::new()), None);
        assert_eq!(average(vec![4.0, 5.0]), Some(4.5));
        assert_eq!(count_where(&[1, 2, 3, 4], |n| n % 2 == 0), 2);
    }
}
