//! KML/KMZ serialization of a `TrackDocument`.

pub mod markup;
pub mod writer;

use std::path::Path;

pub use markup::render;
pub use writer::OutputMode;

use crate::{track::TrackDocument, FlightLogError};

/// Renders `doc` and writes it to `path`, as KML or KMZ
/// depending on the extension. The extension is checked before
/// anything is rendered or created.
pub fn write_document(doc: &TrackDocument, path: &Path) -> Result<OutputMode, FlightLogError> {
    OutputMode::from_path(path)?;
    let kml = render(doc)?;
    writer::write(&kml, path)
}
