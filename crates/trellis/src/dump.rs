//! Colored textual dump of a design tree. A debug aid.

use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    dim::Dim,
    error::Result,
    id::NodeId,
    session::Session,
    tree::DesignTree,
};

/// Walk the attached document and return a string showing each node's
/// name, kind, placement and live bounds, indented by depth.
pub fn dump(sess: &Session) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, sess, sess.tree().root_id(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) {
    write!(buffer, "{indent}  ").unwrap();
    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Green)))
        .unwrap();
    write!(buffer, "{label}").unwrap();
    buffer.reset().unwrap();
    writeln!(buffer, " {value}").unwrap();
}

/// Emit one node and recurse into its children.
fn dump_node(buffer: &mut Buffer, sess: &Session, id: NodeId, level: usize) -> Result<()> {
    let tree = sess.tree();
    let node = sess.node(id)?;

    let indent = "    ".repeat(level);
    write!(buffer, "{indent}").unwrap();

    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))
        .unwrap();
    write!(buffer, "{}", node.name()).unwrap();
    buffer.reset().unwrap();
    write!(buffer, " [{}]", node.widget().kind()).unwrap();

    if sess.selection().contains(id) {
        write!(buffer, " ").unwrap();
        buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))
            .unwrap();
        write!(buffer, "selected").unwrap();
        buffer.reset().unwrap();
    }
    writeln!(buffer).unwrap();

    let placement = node.placement();
    write_field(
        buffer,
        &indent,
        "placement:",
        &format!(
            "left {}, top {}, width {}, height {}",
            dim_summary(tree, placement.left),
            dim_summary(tree, placement.top),
            dim_summary(tree, placement.width),
            dim_summary(tree, placement.height),
        ),
    );

    let bounds = node.bounds();
    write_field(
        buffer,
        &indent,
        "bounds:",
        &format!(
            "x: {}, y: {}, w: {}, h: {}",
            bounds.tl.x, bounds.tl.y, bounds.w, bounds.h
        ),
    );

    let children = node.children().to_vec();
    for child in children {
        dump_node(buffer, sess, child, level + 1)?;
    }

    Ok(())
}

/// A compact one-token rendering of a position reference. Sibling
/// targets are shown by name.
fn dim_summary(tree: &DesignTree, dim: Dim) -> String {
    match dim {
        Dim::Abs(v) => format!("{v}"),
        Dim::Percent { pct, adjust } if adjust == 0 => format!("{pct}%"),
        Dim::Percent { pct, adjust } => format!("{pct}%{adjust:+}"),
        Dim::Fill { margin } if margin == 0 => "fill".to_string(),
        Dim::Fill { margin } => format!("fill({margin})"),
        Dim::Sibling {
            target,
            side,
            offset,
        } => {
            let name = tree
                .node(target)
                .map_or_else(|| "?".to_string(), |n| n.name().to_string());
            let side = format!("{side:?}").to_lowercase();
            if offset == 0 {
                format!("{side}({name})")
            } else {
                format!("{side}({name}){offset:+}")
            }
        }
    }
}
