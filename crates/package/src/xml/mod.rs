//! Arena-backed XML tree used for every XML part of a package.

mod document;
mod element;
mod parse;
mod write;

pub use document::{NodeData, NodeId, XmlDocument};
pub use element::{XmlElement, XmlNode};
