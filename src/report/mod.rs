//! Rendering a [`Report`] to PDF.
//!
//! Page 1 opens with the logo, the project block and the title block; each
//! category follows as a grey heading and a table whose header row repeats
//! at the top of every page the table spans. Footers (coloured rule and
//! `Page N sur M`) are drawn once all pages exist.

pub mod layout;

use chrono::{DateTime, Local, Locale, NaiveDate, TimeZone, Utc};

use crate::error::Result;
use crate::listing::{CategoryTable, ProjectIdentity, Report};
use crate::writer::{
    CellAlign, CellPadding, Color, ColumnWidth, FontManager, FontStyle, HFElement, HFStyle,
    ImageData, PageFooter, PdfWriter, PdfWriterConfig, PlaceholderContext, RuleSegment, Table,
    TableBorderStyle, TableCell, TableLayout, TableRow, TableStyle,
};

pub use layout::{mm, PageFlow, PageGeometry, TextCell, PT_PER_MM};

/// Title blue.
pub const BLUE: Color = Color::new(43.0 / 255.0, 113.0 / 255.0, 184.0 / 255.0);

/// Middle footer segment.
pub const LIGHT_BLUE: Color = Color::new(0.0, 191.0 / 255.0, 220.0 / 255.0);

/// Right footer segment.
pub const YELLOW: Color = Color::new(252.0 / 255.0, 181.0 / 255.0, 32.0 / 255.0);

/// Category heading background.
pub const HEADING_GREY: Color = Color::new(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0);

/// Table column weights: number, version, name, dispatch code.
const COLUMN_WEIGHTS: [f32; 4] = [1.0, 1.0, 7.0, 1.0];

/// Table column alignments.
const COLUMN_ALIGNS: [CellAlign; 4] = [
    CellAlign::Center,
    CellAlign::Center,
    CellAlign::Left,
    CellAlign::Center,
];

/// Table font size.
const TABLE_FONT_SIZE: f32 = 11.0;

/// Category heading box height, in mm.
const HEADING_HEIGHT_MM: f32 = 10.0;

/// Space from the top of a heading to its table, and after each table, in mm.
const SECTION_GAP_MM: f32 = 13.0;

/// Format the edition date the French way: `05 mars 2024`.
pub fn french_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| {
            Utc.from_utc_datetime(&dt)
                .format_localized("%d %B %Y", Locale::fr_FR)
                .to_string()
        })
        .unwrap_or_else(|| date.format("%d/%m/%Y").to_string())
}

/// Lays out reports on A4 pages.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    geometry: PageGeometry,
    logo: Option<ImageData>,
    compress: bool,
    created: Option<DateTime<Local>>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Create a renderer for A4 pages with compressed content streams.
    pub fn new() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            logo: None,
            compress: true,
            created: None,
        }
    }

    /// Draw this logo on the first page.
    pub fn with_logo(mut self, logo: ImageData) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Record a creation time in the document information.
    pub fn with_creation_time(mut self, created: DateTime<Local>) -> Self {
        self.created = Some(created);
        self
    }

    /// Render the report to PDF bytes.
    pub fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let mut config = PdfWriterConfig::default()
            .with_title(format!("Liste BPE - {}", report.edition_date.format("%Y-%m-%d")))
            .with_subject(format!("Poste de {}", report.project.name))
            .with_compress(self.compress);
        if let Some(created) = &self.created {
            config = config.with_creation_date(created);
        }

        let mut writer = PdfWriter::with_config(config);
        let logo_id = self.logo.clone().map(|logo| writer.register_image(logo));

        let mut flow = PageFlow::new(writer, self.geometry);

        if let (Some(id), Some(logo)) = (&logo_id, &self.logo) {
            self.draw_logo(&mut flow, id, logo)?;
        }
        self.draw_project_block(&mut flow, &report.project)?;
        self.draw_title_block(&mut flow, &report.title, report.edition_date)?;

        for table in &report.tables {
            self.draw_category(&mut flow, table)?;
        }

        let total = flow.page_count();
        self.draw_footers(&mut flow, total)?;

        log::debug!(
            "Rendered {} categories, {} documents on {} pages",
            report.tables.len(),
            report.document_count(),
            total
        );

        flow.into_writer().finish()
    }

    fn draw_logo(&self, flow: &mut PageFlow, id: &str, logo: &ImageData) -> Result<()> {
        let width = mm(60.0);
        let height = logo.height_for_width(width);
        let bottom = flow.pdf_y(mm(6.0) + height);
        flow.content()?.draw_image(id, mm(8.0), bottom, width, height);
        Ok(())
    }

    fn draw_project_block(&self, flow: &mut PageFlow, project: &ProjectIdentity) -> Result<()> {
        let x = self.geometry.margin_left + mm(80.0);
        let top = flow.y();

        let name = format!("Poste de {}", project.name);
        flow.text_cell(TextCell::new(&name, FontStyle::Bold, 20.0), x, top, mm(30.0), mm(10.0))?;
        flow.advance(mm(13.0));

        let top = flow.y();
        flow.text_cell(TextCell::new("Affaire N° :", FontStyle::Italic, 12.0), x, top, mm(25.0), 0.0)?;
        flow.text_cell(
            TextCell::new(&project.number, FontStyle::Regular, 14.0),
            x + mm(25.0),
            top,
            mm(25.0),
            0.0,
        )?;
        flow.advance(mm(7.0));

        let top = flow.y();
        flow.text_cell(TextCell::new("Classement :", FontStyle::Italic, 12.0), x, top, mm(26.0), 0.0)?;
        flow.text_cell(
            TextCell::new(&project.rank, FontStyle::Regular, 14.0),
            x + mm(26.0),
            top,
            mm(26.0),
            0.0,
        )?;
        flow.advance(mm(13.0));
        Ok(())
    }

    fn draw_title_block(&self, flow: &mut PageFlow, title: &str, date: NaiveDate) -> Result<()> {
        let left = self.geometry.margin_left;
        let right = self.geometry.width - self.geometry.margin_right;
        let width = self.geometry.content_width();
        let rule_width = mm(0.2);

        flow.rule(left, right, mm(41.0), rule_width, BLUE)?;

        let top = flow.y();
        flow.text_cell(
            TextCell::new(title, FontStyle::Bold, 20.0)
                .color(BLUE)
                .align(CellAlign::Center),
            left,
            top,
            width,
            mm(10.0),
        )?;
        flow.advance(mm(9.0));

        let edition = format!("Edition du {}", french_date(date));
        let top = flow.y();
        flow.text_cell(
            TextCell::new(&edition, FontStyle::Italic, 12.0).align(CellAlign::Center),
            left,
            top,
            width,
            mm(10.0),
        )?;

        flow.rule(left, right, mm(63.0), rule_width, BLUE)?;
        flow.advance(mm(16.0));
        Ok(())
    }

    fn category_table(&self, category: &CategoryTable) -> Table {
        let rows = category
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = row.iter().map(TableCell::text).collect();
                if i == 0 {
                    TableRow::header(cells)
                } else {
                    TableRow::new(cells)
                }
            })
            .collect();

        let style = TableStyle {
            font_size: TABLE_FONT_SIZE,
            line_spacing: 2.0,
            cell_padding: CellPadding::uniform(layout::CELL_MARGIN),
            top_border: Some(TableBorderStyle::new(mm(0.2)).with_color(BLUE)),
            body_font: FontStyle::Regular,
            header_font: FontStyle::Bold,
            text_color: Color::black(),
        };

        Table::from_rows(rows)
            .with_style(style)
            .with_column_widths(COLUMN_WEIGHTS.iter().map(|w| ColumnWidth::Weight(*w)).collect())
            .with_column_aligns(COLUMN_ALIGNS.to_vec())
    }

    fn draw_category(&self, flow: &mut PageFlow, category: &CategoryTable) -> Result<()> {
        let table = self.category_table(category);
        let layout = table.calculate_layout(self.geometry.content_width(), &FontManager::new());
        let header_rows = table.header_rows();
        let left = self.geometry.margin_left;

        // Keep the heading with the table header and its first row
        let lead_rows = (header_rows + 1).min(table.num_rows());
        flow.ensure(mm(SECTION_GAP_MM) + layout.height_of(0..lead_rows));

        let top = flow.y();
        flow.fill_rect(left, top, self.geometry.content_width(), mm(HEADING_HEIGHT_MM), HEADING_GREY)?;
        flow.text_cell(
            TextCell::new(&category.label, FontStyle::Bold, 14.0),
            left,
            top,
            self.geometry.content_width(),
            mm(HEADING_HEIGHT_MM),
        )?;
        flow.advance(mm(SECTION_GAP_MM));

        self.draw_rows(flow, &table, &layout, 0..header_rows)?;

        for row in header_rows..table.num_rows() {
            if flow.ensure(layout.row_heights[row]) {
                log::trace!("Table '{}' continues on page {}", category.label, flow.page_count());
                self.draw_rows(flow, &table, &layout, 0..header_rows)?;
            }
            self.draw_rows(flow, &table, &layout, row..row + 1)?;
        }

        flow.advance(mm(SECTION_GAP_MM));
        Ok(())
    }

    fn draw_rows(
        &self,
        flow: &mut PageFlow,
        table: &Table,
        layout: &TableLayout,
        rows: std::ops::Range<usize>,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let top = flow.pdf_y(flow.y());
        let drawn = table.render_rows(flow.content()?, layout, rows, self.geometry.margin_left, top);
        flow.advance(drawn);
        Ok(())
    }

    fn footer(&self) -> PageFooter {
        PageFooter::new(HFElement::center("Page {page} sur {pages}"))
            .with_segment(RuleSegment::new(0.0, mm(120.0), BLUE))
            .with_segment(RuleSegment::new(mm(120.0), mm(180.0), LIGHT_BLUE))
            .with_segment(RuleSegment::new(mm(180.0), mm(210.0), YELLOW))
            .with_rule(mm(280.0), mm(1.0))
            .with_text_cell(self.geometry.height - mm(15.0), mm(10.0))
            .with_margins(self.geometry.margin_left, self.geometry.margin_right)
            .with_style(HFStyle::new().font(FontStyle::Italic, 11.0))
    }

    fn draw_footers(&self, flow: &mut PageFlow, total: usize) -> Result<()> {
        let footer = self.footer();
        let (width, height) = (self.geometry.width, self.geometry.height);
        for index in 0..total {
            let context = PlaceholderContext::new(index + 1, total);
            footer.render(flow.page_content(index)?, &context, width, height);
        }
        Ok(())
    }
}
