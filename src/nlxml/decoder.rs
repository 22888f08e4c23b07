//! Decoding of a Neurolucida XML document into [NeuronData].
//!
//! Elements are decoded with an explicit stack of [Frame]s, one per open
//! element that collects children, so branch nesting depth is bounded by
//! memory rather than by the call stack.

use crate::model::{Branch, Contour, Image, LeafKind, Marker, NeuronData, NeuronType, Point, Tree};
use crate::nlxml::defs::*;
use crate::nlxml::reader::{Element, MarkupEvent, MarkupReader};
use crate::parser::byte_source::ByteSource;
use crate::parser::{ByteParser, ParsingError, ParsingErrorType};
use log::{debug, warn};

/// Element under construction, waiting for its end tag.
enum Frame {
    Tree(Tree),
    Branch(Branch),
    Contour(Contour),
    Marker(Marker),
    Images,
    Image(Image),
    Filename(String),
}

impl Frame {
    /// The branch points, markers and child branches are added to, if any.
    fn branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Frame::Tree(tree) => Some(&mut tree.root),
            Frame::Branch(branch) => Some(branch),
            _ => None,
        }
    }
}

/// What to do with an element, given the innermost open frame.
enum Action {
    Open(Frame),
    /// Handled completely by its start tag
    Done,
    Unknown,
}

/// Decodes a complete document.
///
/// # Errors
/// Returns a [ParsingError] if the markup is malformed, the document has no
/// root element, or an attribute value cannot be read. No partial result
/// is returned.
pub(crate) fn decode_document<S: ByteSource>(
    parser: ByteParser<S>,
) -> Result<NeuronData, ParsingError> {
    let mut reader = MarkupReader::new(parser);
    let mut data = NeuronData::new();

    // Locate root
    loop {
        match reader.next_event()? {
            MarkupEvent::Start(root) => {
                check_root(&root);
                break;
            }
            MarkupEvent::Empty(root) => {
                check_root(&root);
                return Ok(data);
            }
            MarkupEvent::Eof => {
                return Err(ParsingError::without_context(
                    ParsingErrorType::MissingRootElement,
                ));
            }
            MarkupEvent::Text(_) | MarkupEvent::End(_) => {}
        }
    }

    let mut stack: Vec<Frame> = Vec::new();
    loop {
        match reader.next_event()? {
            MarkupEvent::Start(element) => {
                match dispatch(&reader, stack.last_mut(), &element)? {
                    Action::Open(frame) => stack.push(frame),
                    Action::Done => reader.skip_element()?,
                    Action::Unknown => {
                        warn_unknown(&reader, &element);
                        reader.skip_element()?;
                    }
                }
            }
            MarkupEvent::Empty(element) => {
                match dispatch(&reader, stack.last_mut(), &element)? {
                    Action::Open(frame) => attach(frame, stack.last_mut(), &mut data),
                    Action::Done => {}
                    Action::Unknown => warn_unknown(&reader, &element),
                }
            }
            MarkupEvent::End(_) => match stack.pop() {
                Some(frame) => attach(frame, stack.last_mut(), &mut data),
                // Root closed
                None => break,
            },
            MarkupEvent::Text(text) => {
                if let Some(Frame::Filename(name)) = stack.last_mut() {
                    name.push_str(&text);
                }
            }
            MarkupEvent::Eof => break,
        }
    }

    debug!(
        "Decoded {} trees ({} points), {} contours, {} file markers, {} images",
        data.trees.len(),
        data.num_tree_points(),
        data.contours.len(),
        data.markers.len(),
        data.images.len()
    );
    Ok(data)
}

fn check_root(root: &Element) {
    if root.name != ROOT_TAG {
        warn!("Root element is <{}>, expected <{}>", root.name, ROOT_TAG);
    }
}

fn warn_unknown<S: ByteSource>(reader: &MarkupReader<S>, element: &Element) {
    warn!(
        "Skipping unknown element <{}> at line {}",
        element.name,
        reader.line_at(element.position)
    );
}

/// Decides what an element means inside the innermost open frame (`None`
/// means directly inside the root). Elements that carry all their content
/// in attributes are stored right away.
fn dispatch<S: ByteSource>(
    reader: &MarkupReader<S>,
    parent: Option<&mut Frame>,
    element: &Element,
) -> Result<Action, ParsingError> {
    let name = element.name.as_str();
    let action = match parent {
        None => match name {
            TREE => Action::Open(Frame::Tree(read_tree(reader, element)?)),
            CONTOUR => Action::Open(Frame::Contour(read_contour(reader, element)?)),
            MARKER => Action::Open(Frame::Marker(read_marker(reader, element)?)),
            IMAGES => Action::Open(Frame::Images),
            _ => Action::Unknown,
        },
        Some(Frame::Tree(tree)) => branch_action(reader, &mut tree.root, element)?,
        Some(Frame::Branch(branch)) => branch_action(reader, branch, element)?,
        Some(Frame::Contour(contour)) => match name {
            POINT => {
                contour.points.push(read_point(reader, element)?);
                Action::Done
            }
            MARKER => Action::Open(Frame::Marker(read_marker(reader, element)?)),
            _ => Action::Unknown,
        },
        Some(Frame::Marker(marker)) => match name {
            POINT => {
                marker.points.push(read_point(reader, element)?);
                Action::Done
            }
            _ => Action::Unknown,
        },
        Some(Frame::Images) => match name {
            IMAGE => Action::Open(Frame::Image(Image::default())),
            _ => Action::Unknown,
        },
        Some(Frame::Image(image)) => match name {
            FILENAME => Action::Open(Frame::Filename(String::new())),
            SCALE => {
                image.scale.x = reader.f64_attribute(element, ATTR_X)?;
                image.scale.y = reader.f64_attribute(element, ATTR_Y)?;
                Action::Done
            }
            COORD => {
                image.coord.x = reader.f64_attribute(element, ATTR_X)?;
                image.coord.y = reader.f64_attribute(element, ATTR_Y)?;
                image.coord.z = reader.f64_attribute(element, ATTR_Z)?;
                Action::Done
            }
            ZSPACING => {
                image.z_spacing = reader.f64_attribute(element, ATTR_Z)?;
                image.slices = reader.usize_attribute(element, ATTR_SLICES)?;
                Action::Done
            }
            _ => Action::Unknown,
        },
        Some(Frame::Filename(_)) => Action::Unknown,
    };
    Ok(action)
}

/// Dispatch inside a tree or branch.
fn branch_action<S: ByteSource>(
    reader: &MarkupReader<S>,
    branch: &mut Branch,
    element: &Element,
) -> Result<Action, ParsingError> {
    Ok(match element.name.as_str() {
        POINT => {
            branch.points.push(read_point(reader, element)?);
            Action::Done
        }
        BRANCH => Action::Open(Frame::Branch(Branch::new(read_leaf_kind(element)))),
        MARKER => Action::Open(Frame::Marker(read_marker(reader, element)?)),
        _ => Action::Unknown,
    })
}

/// Adds a finished frame to its parent (`None` means the root).
///
/// Frames are only opened where [dispatch] allows them, so every frame has
/// a matching parent.
fn attach(frame: Frame, parent: Option<&mut Frame>, data: &mut NeuronData) {
    match (frame, parent) {
        (Frame::Tree(tree), None) => data.trees.push(tree),
        (Frame::Contour(contour), None) => data.contours.push(contour),
        (Frame::Marker(marker), None) => data.markers.push(marker),
        (Frame::Marker(marker), Some(Frame::Contour(contour))) => contour.markers.push(marker),
        (Frame::Marker(marker), Some(parent)) => {
            if let Some(branch) = parent.branch_mut() {
                branch.markers.push(marker);
            }
        }
        (Frame::Branch(branch), Some(parent)) => {
            if let Some(owner) = parent.branch_mut() {
                owner.children.push(branch);
            }
        }
        (Frame::Image(image), Some(Frame::Images)) => data.images.push(image),
        (Frame::Filename(name), Some(Frame::Image(image))) => {
            image.filenames.push(name.trim().to_string())
        }
        _ => {}
    }
}

// ============================================================================
// Element readers
// ============================================================================
fn read_point<S: ByteSource>(
    reader: &MarkupReader<S>,
    element: &Element,
) -> Result<Point, ParsingError> {
    Ok(Point::new(
        reader.f64_attribute(element, ATTR_X)?,
        reader.f64_attribute(element, ATTR_Y)?,
        reader.f64_attribute(element, ATTR_Z)?,
        reader.f64_attribute(element, ATTR_DIAMETER)?,
    ))
}

fn read_leaf_kind(element: &Element) -> LeafKind {
    match element.attribute(ATTR_LEAF) {
        None => LeafKind::Unspecified,
        Some(name) => {
            let kind = LeafKind::from_name(name);
            if let LeafKind::Other(other) = &kind {
                warn!("Unknown leaf kind '{other}' kept as is");
            }
            kind
        }
    }
}

fn read_tree<S: ByteSource>(
    reader: &MarkupReader<S>,
    element: &Element,
) -> Result<Tree, ParsingError> {
    let color = reader.color_attribute(element, ATTR_COLOR)?;
    let neuron_type = NeuronType::from_name(&reader.str_attribute(element, ATTR_TYPE));
    Ok(Tree::new(neuron_type, color).with_root(Branch::new(read_leaf_kind(element))))
}

fn read_contour<S: ByteSource>(
    reader: &MarkupReader<S>,
    element: &Element,
) -> Result<Contour, ParsingError> {
    let mut contour = Contour::new(
        reader.str_attribute(element, ATTR_NAME),
        reader.color_attribute(element, ATTR_COLOR)?,
        reader.bool_attribute(element, ATTR_CLOSED)?,
    );
    contour.shape = reader.str_attribute(element, ATTR_SHAPE);
    Ok(contour)
}

fn read_marker<S: ByteSource>(
    reader: &MarkupReader<S>,
    element: &Element,
) -> Result<Marker, ParsingError> {
    let mut marker = Marker::new(
        reader.str_attribute(element, ATTR_TYPE),
        reader.str_attribute(element, ATTR_NAME),
        reader.color_attribute(element, ATTR_COLOR)?,
    );
    marker.varicosity = reader.bool_attribute(element, ATTR_VARICOSITY)?;
    Ok(marker)
}
