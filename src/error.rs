use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PBF error: {0}")]
    Pbf(#[from] osmpbf::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// An attribute that must be numeric (ids, refs, coordinates) did not parse.
    #[error("invalid {name}=\"{value}\" on <{element}>")]
    InvalidAttribute {
        element: String,
        name: String,
        value: String,
    },

    #[error("node {0} is referenced by a highway but has no coordinates")]
    MissingCoordinate(i64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
