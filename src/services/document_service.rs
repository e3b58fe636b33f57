// src/services/document_service.rs

use std::path::{Path, PathBuf};

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{common::error::AppError, models::package::Package};

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

/// Gera a etiqueta de envio (PDF) de um colis, com QR code do PIN de rastreio.
#[derive(Clone)]
pub struct DocumentService {
    font_dir: PathBuf,
}

impl DocumentService {
    pub fn new(font_dir: PathBuf) -> Self {
        Self { font_dir }
    }

    pub async fn shipping_label(&self, package: Package) -> Result<Vec<u8>, AppError> {
        let font_dir = self.font_dir.clone();
        // genpdf é síncrono e pesado: roda fora do runtime
        tokio::task::spawn_blocking(move || render_label(&font_dir, &package))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de geração do PDF: {}", e))?
    }
}

fn render_label(font_dir: &Path, package: &Package) -> Result<Vec<u8>, AppError> {
    // 1. Fonte (pasta configurada em FONT_DIR)
    let font_family = genpdf::fonts::from_files(font_dir, "Roboto", None)
        .map_err(|_| AppError::FontNotFound(format!("Roboto introuvable dans {}", font_dir.display())))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Étiquette {}", package.tracking_pin));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(
        elements::Paragraph::new(package.tracking_pin.clone())
            .styled(style::Style::new().bold().with_font_size(22)),
    );
    doc.push(elements::Paragraph::new(package.transport_mode.label()).styled(style::Style::new().with_font_size(12)));
    doc.push(elements::Break::new(1.5));

    // --- DADOS DO COLIS ---
    let mut table = elements::TableLayout::new(vec![1, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    let dims = &package.dimensions;
    let rows = [
        ("Client", package.client_name.clone()),
        ("Description", package.description.clone()),
        ("Poids", format!("{} kg", package.weight_kg)),
        ("Dimensions", format!("{} × {} × {} cm", dims.length_cm, dims.width_cm, dims.height_cm)),
        ("Volume", format!("{:.3} m³", dims.volume_m3())),
        ("Créé le", package.created_at.format("%d/%m/%Y").to_string()),
    ];
    for (label, value) in rows {
        table
            .row()
            .element(elements::Paragraph::new(label).styled(style_bold))
            .element(elements::Paragraph::new(value))
            .push()
            .map_err(render_error)?;
    }
    doc.push(table);
    doc.push(elements::Break::new(2));

    // --- QR CODE DO PIN ---
    let code = QrCode::new(package.tracking_pin.as_bytes()).map_err(render_error)?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
        .map_err(render_error)?
        .with_scale(genpdf::Scale::new(0.6, 0.6));
    doc.push(pdf_image);

    doc.push(elements::Break::new(1));
    doc.push(
        elements::Paragraph::new(format!("Suivi : /api/public/track/{}", package.tracking_pin))
            .styled(style::Style::new().italic().with_font_size(8)),
    );

    // Renderiza para memória
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(render_error)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::{Dimensions, PackageStatus, PaymentStatus, TransportMode};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[tokio::test]
    async fn missing_font_directory_is_reported() {
        let service = DocumentService::new(PathBuf::from("/nonexistent/fonts"));
        let package = Package {
            id: Uuid::new_v4(),
            company_id: None,
            tracking_pin: "CA-TEST0001".into(),
            description: "Test".into(),
            weight_kg: Decimal::ONE,
            dimensions: Dimensions { length_cm: 10.0, width_cm: 10.0, height_cm: 10.0 },
            transport_mode: TransportMode::Aerial,
            status: PackageStatus::Planned,
            price: Decimal::ZERO,
            payment_status: PaymentStatus::Pending,
            client_name: "Client".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let err = service.shipping_label(package).await.unwrap_err();
        assert!(matches!(err, AppError::FontNotFound(_)));
    }
}
