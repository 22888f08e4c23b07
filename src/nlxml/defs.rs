//! Constants for reading and writing the Neurolucida XML encoding.

/// Name of the root element
pub(crate) const ROOT_TAG: &str = "mbf";
/// Value of the root's `version` attribute written by this crate
pub(crate) const FORMAT_VERSION: &str = "4.0";
/// Namespace declared as both `xmlns` and `xmlns:nl`
pub(crate) const NAMESPACE: &str = "http://www.mbfbioscience.com/2007/neurolucida";
/// Declaration written at the top of every document
pub(crate) const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Delimiters ending an element or attribute name
pub(crate) const NAME_DELIMITERS: &[u8] = b" \t\r\n/>=";

/// Default indentation of the writer
pub(crate) const DEFAULT_INDENT: &str = "    ";

// Element names
pub(crate) const TREE: &str = "tree";
pub(crate) const BRANCH: &str = "branch";
pub(crate) const POINT: &str = "point";
pub(crate) const MARKER: &str = "marker";
pub(crate) const CONTOUR: &str = "contour";
pub(crate) const IMAGES: &str = "images";
pub(crate) const IMAGE: &str = "image";
pub(crate) const FILENAME: &str = "filename";
pub(crate) const SCALE: &str = "scale";
pub(crate) const COORD: &str = "coord";
pub(crate) const ZSPACING: &str = "zspacing";

// Attribute names
pub(crate) const ATTR_X: &str = "x";
pub(crate) const ATTR_Y: &str = "y";
pub(crate) const ATTR_Z: &str = "z";
pub(crate) const ATTR_DIAMETER: &str = "d";
pub(crate) const ATTR_COLOR: &str = "color";
pub(crate) const ATTR_TYPE: &str = "type";
pub(crate) const ATTR_LEAF: &str = "leaf";
pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_SHAPE: &str = "shape";
pub(crate) const ATTR_CLOSED: &str = "closed";
pub(crate) const ATTR_VARICOSITY: &str = "varicosity";
pub(crate) const ATTR_SLICES: &str = "slices";
