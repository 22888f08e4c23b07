//! Neurolucida XML writing.

use crate::model::{Branch, Contour, Image, Marker, NeuronData, Point, Tree};
use crate::nlxml::color::color_to_string;
use crate::nlxml::defs::*;
use crate::parser::utils::escape_markup;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Rough number of bytes per written point, used to presize the output
const BYTES_PER_POINT: usize = 64;

/// Writer for the Neurolucida XML encoding.
///
/// Emission order is fixed so output is deterministic: trees, then contours,
/// then file-level markers. Within a tree or branch: points, then child
/// branches, then markers. Image calibration is only written when enabled
/// with [NlxmlWriter::with_images].
///
/// Numbers are written in their shortest round-trip form, so decoding the
/// output yields exactly the values written.
///
/// # Example
/// ```
/// use nlxml::model::{Branch, Color, LeafKind, NeuronData, NeuronType, Point, Tree};
/// use nlxml::nlxml::NlxmlWriter;
///
/// let mut data = NeuronData::new();
/// let root = Branch::new(LeafKind::Normal).with_points(vec![Point::new(0.5, 1.0, 0.0, 2.0)]);
/// data.trees.push(Tree::new(NeuronType::Dendrite, Color::RED).with_root(root));
///
/// let xml = NlxmlWriter::new().with_indent("  ").render(&data);
/// assert!(xml.contains("<tree color=\"#FF0000\" type=\"Dendrite\" leaf=\"Normal\">"));
/// assert!(xml.contains("<point x=\"0.5\" y=\"1\" z=\"0\" d=\"2\"/>"));
/// ```
#[derive(Debug, Clone)]
pub struct NlxmlWriter {
    indent: String,
    images: bool,
}

impl Default for NlxmlWriter {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            images: false,
        }
    }
}

/// Pending work of the branch traversal.
enum Task<'a> {
    Branch(&'a Branch, usize),
    Markers(&'a [Marker], usize),
    Close(&'static str, usize),
}

impl NlxmlWriter {
    /// Creates a writer with default settings (four-space indent, no images).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the string used for one level of indentation.
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Emits the image calibration block before the trees.
    pub fn with_images(mut self) -> Self {
        self.images = true;
        self
    }

    /// Renders `data` as a complete document.
    pub fn render(&self, data: &NeuronData) -> String {
        let estimate = (data.num_tree_points() + 16) * BYTES_PER_POINT;
        let mut out = String::with_capacity(estimate);

        out.push_str(XML_DECLARATION);
        out.push('\n');
        let _ = writeln!(
            out,
            "<{ROOT_TAG} version=\"{FORMAT_VERSION}\" xmlns=\"{NAMESPACE}\" xmlns:nl=\"{NAMESPACE}\">"
        );

        if self.images && !data.images.is_empty() {
            self.open_line(&mut out, 1, IMAGES);
            for image in &data.images {
                self.write_image(&mut out, image, 2);
            }
            self.close_line(&mut out, 1, IMAGES);
        }
        for tree in &data.trees {
            self.write_tree(&mut out, tree, 1);
        }
        for contour in &data.contours {
            self.write_contour(&mut out, contour, 1);
        }
        for marker in &data.markers {
            self.write_marker(&mut out, marker, 1);
        }

        let _ = writeln!(out, "</{ROOT_TAG}>");
        out
    }

    /// Writes `data` as a complete document to `writer`.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails.
    pub fn write<W: Write>(&self, data: &NeuronData, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);
        writer.write_all(self.render(data).as_bytes())?;
        writer.flush()
    }

    /// Writes `data` as a complete document to the file at `path`,
    /// replacing existing content.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be created or written.
    pub fn write_file<P: AsRef<Path>>(&self, data: &NeuronData, path: P) -> io::Result<()> {
        self.write(data, File::create(path)?)
    }

    // ============================================================================
    // Elements (private)
    // ============================================================================
    fn pad(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
    }

    fn open_line(&self, out: &mut String, depth: usize, tag: &str) {
        self.pad(out, depth);
        let _ = writeln!(out, "<{tag}>");
    }

    fn close_line(&self, out: &mut String, depth: usize, tag: &str) {
        self.pad(out, depth);
        let _ = writeln!(out, "</{tag}>");
    }

    fn write_point(&self, out: &mut String, point: &Point, depth: usize) {
        self.pad(out, depth);
        let _ = writeln!(
            out,
            "<{POINT} {ATTR_X}=\"{}\" {ATTR_Y}=\"{}\" {ATTR_Z}=\"{}\" {ATTR_DIAMETER}=\"{}\"/>",
            point.x, point.y, point.z, point.diameter
        );
    }

    fn write_marker(&self, out: &mut String, marker: &Marker, depth: usize) {
        self.pad(out, depth);
        let _ = writeln!(
            out,
            "<{MARKER} {ATTR_TYPE}=\"{}\" {ATTR_NAME}=\"{}\" {ATTR_COLOR}=\"{}\" {ATTR_VARICOSITY}=\"{}\">",
            escape_markup(&marker.kind),
            escape_markup(&marker.name),
            color_to_string(&marker.color),
            marker.varicosity
        );
        for point in &marker.points {
            self.write_point(out, point, depth + 1);
        }
        self.close_line(out, depth, MARKER);
    }

    fn write_contour(&self, out: &mut String, contour: &Contour, depth: usize) {
        self.pad(out, depth);
        let _ = writeln!(
            out,
            "<{CONTOUR} {ATTR_NAME}=\"{}\" {ATTR_SHAPE}=\"{}\" {ATTR_COLOR}=\"{}\" {ATTR_CLOSED}=\"{}\">",
            escape_markup(&contour.name),
            escape_markup(&contour.shape),
            color_to_string(&contour.color),
            contour.closed
        );
        for point in &contour.points {
            self.write_point(out, point, depth + 1);
        }
        for marker in &contour.markers {
            self.write_marker(out, marker, depth + 1);
        }
        self.close_line(out, depth, CONTOUR);
    }

    fn write_image(&self, out: &mut String, image: &Image, depth: usize) {
        self.open_line(out, depth, IMAGE);
        for filename in &image.filenames {
            self.pad(out, depth + 1);
            let _ = writeln!(out, "<{FILENAME}>{}</{FILENAME}>", escape_markup(filename));
        }
        self.pad(out, depth + 1);
        let _ = writeln!(
            out,
            "<{SCALE} {ATTR_X}=\"{}\" {ATTR_Y}=\"{}\"/>",
            image.scale.x, image.scale.y
        );
        self.pad(out, depth + 1);
        let _ = writeln!(
            out,
            "<{COORD} {ATTR_X}=\"{}\" {ATTR_Y}=\"{}\" {ATTR_Z}=\"{}\"/>",
            image.coord.x, image.coord.y, image.coord.z
        );
        self.pad(out, depth + 1);
        let _ = writeln!(
            out,
            "<{ZSPACING} {ATTR_Z}=\"{}\" {ATTR_SLICES}=\"{}\"/>",
            image.z_spacing, image.slices
        );
        self.close_line(out, depth, IMAGE);
    }

    /// Writes a tree and all its branches using an explicit stack.
    fn write_tree(&self, out: &mut String, tree: &Tree, depth: usize) {
        self.pad(out, depth);
        let _ = writeln!(
            out,
            "<{TREE} {ATTR_COLOR}=\"{}\" {ATTR_TYPE}=\"{}\" {ATTR_LEAF}=\"{}\">",
            color_to_string(&tree.color),
            escape_markup(tree.neuron_type.as_str()),
            escape_markup(tree.root.leaf.as_str())
        );

        let mut stack = Vec::new();
        self.write_content(out, &tree.root, depth, TREE, &mut stack);

        while let Some(task) = stack.pop() {
            match task {
                Task::Branch(branch, depth) => {
                    self.pad(out, depth);
                    let _ = writeln!(
                        out,
                        "<{BRANCH} {ATTR_LEAF}=\"{}\">",
                        escape_markup(branch.leaf.as_str())
                    );
                    self.write_content(out, branch, depth, BRANCH, &mut stack);
                }
                Task::Markers(markers, depth) => {
                    for marker in markers {
                        self.write_marker(out, marker, depth);
                    }
                }
                Task::Close(tag, depth) => self.close_line(out, depth, tag),
            }
        }
    }

    /// Writes the points of an opened tree or branch element and schedules
    /// its children, markers and end tag, in that order.
    fn write_content<'a>(
        &self,
        out: &mut String,
        branch: &'a Branch,
        depth: usize,
        tag: &'static str,
        stack: &mut Vec<Task<'a>>,
    ) {
        for point in &branch.points {
            self.write_point(out, point, depth + 1);
        }
        stack.push(Task::Close(tag, depth));
        stack.push(Task::Markers(&branch.markers, depth + 1));
        for child in branch.children.iter().rev() {
            stack.push(Task::Branch(child, depth + 1));
        }
    }
}
