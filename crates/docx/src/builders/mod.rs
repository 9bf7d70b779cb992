//! Builders that produce WordprocessingML fragments.
//!
//! Each builder is a small value type configured fluently and turned into an
//! owned [`XmlElement`] with [`WordBuilder::build`]. Builders that hold
//! heterogeneous children (paragraphs hold runs and drawings, cells hold
//! paragraphs and tables) store them as `Box<dyn WordBuilder>`.
//!
//! ```ignore
//! let p = Paragraph::new()
//!     .spacing(240, 120)
//!     .run(Run::new("Event Evidence").bold().size_pt(14.0));
//! let xml = Box::new(p).build();
//! ```

mod drawing;
mod paragraph;
mod run;
mod table;

pub use drawing::Drawing;
pub use paragraph::{Alignment, Paragraph};
pub use run::{text_elements, Run, RunFormat};
pub use table::{Cell, Row, Table};

use dossier_package::XmlElement;

/// Anything that can be turned into one WordprocessingML element.
pub trait WordBuilder {
    fn build(self: Box<Self>) -> XmlElement;
}
