//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! Table / PageFooter / ImageData
//!     ↓
//! [ContentStreamBuilder] (drawing operators → content stream bytes)
//!     ↓
//! [PdfWriter] (pages, Helvetica fonts, image XObjects)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use bpe_listing::writer::{PdfWriter, FontStyle};
//!
//! let mut writer = PdfWriter::new();
//! writer
//!     .add_a4_page()
//!     .add_text("Liste des Plans BPE", 72.0, 720.0, FontStyle::Bold, 20.0)
//!     .finish();
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod font_manager;
mod image_handler;
mod object_serializer;
mod page_template;
mod pdf_writer;
mod table_renderer;

pub use content_stream::{Color, ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{encode_win_ansi, FontManager, FontStyle};
pub use image_handler::{ColorSpace, ImageData, ImageError, ImageFormat};
pub use object_serializer::ObjectSerializer;
pub use page_template::{
    HFAlignment, HFElement, HFStyle, PageFooter, Placeholder, PlaceholderContext, RuleSegment,
};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig, A4_HEIGHT, A4_WIDTH};
pub use table_renderer::{
    wrap_text, CellAlign, CellPadding, ColumnWidth, Table, TableBorderStyle, TableCell,
    TableLayout, TableRow, TableStyle,
};
