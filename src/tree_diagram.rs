//! Level-by-level ASCII drawing of an `OrderedTree`.
//!
//! Each level gets a key line and, except for the bottom level, a
//! connector line: `|` under a key marks a left child, `-` runs toward the
//! right child and a second `|` marks where it hangs. Cell widths halve at
//! every level, so the drawing is as wide as the bottom level needs.

use crate::ordered_tree::{NodeId, OrderedTree, EMPTY_TREE};

/// Trees with more levels than this are not drawn; the cell grid would
/// need `2^(levels-1)` slots per line.
pub const MAX_DIAGRAM_LEVELS: usize = 12;

pub(crate) fn render(tree: &OrderedTree) -> String {
    let Some(root) = tree.root() else {
        return EMPTY_TREE.to_string();
    };
    let levels = tree.level_count();
    if levels > MAX_DIAGRAM_LEVELS {
        return format!(
            "tree too deep to draw ({} levels)\n{}",
            levels,
            tree.render_simple()
        );
    }

    let slots = 1usize << (levels - 1);
    let line_width = slots * (cell_width(tree) + 1);

    let mut out = String::new();
    let mut row: Vec<Option<NodeId>> = vec![Some(root)];
    for level in 1..=levels {
        let bottom = level == levels;
        let cell = line_width / row.len();
        let half = cell / 2;
        let mut keys = String::with_capacity(line_width);
        let mut links = String::with_capacity(line_width);

        for slot in &row {
            let Some(id) = *slot else {
                pad(&mut keys, ' ', cell);
                pad(&mut links, ' ', cell);
                continue;
            };
            let label = tree.key_of(id).to_string();
            keys.push_str(&label);
            if bottom {
                pad(&mut keys, ' ', cell.saturating_sub(label.len()));
                continue;
            }
            let (left, right) = tree.children(id);
            let run = if right.is_some() { '-' } else { ' ' };
            links.push(if left.is_some() { '|' } else { ' ' });
            pad(&mut keys, run, half.saturating_sub(label.len()));
            pad(&mut links, ' ', half.saturating_sub(1));
            keys.push(run);
            links.push(if right.is_some() { '|' } else { ' ' });
            let rest = cell.saturating_sub(half + 1);
            pad(&mut keys, ' ', rest);
            pad(&mut links, ' ', rest);
        }

        out.push_str(&keys);
        out.push('\n');
        if bottom {
            break;
        }
        out.push_str(&links);
        out.push('\n');

        row = row
            .iter()
            .flat_map(|slot| match *slot {
                Some(id) => {
                    let (left, right) = tree.children(id);
                    [left, right]
                }
                None => [None, None],
            })
            .collect();
    }
    out
}

/// Widest key among the extremes plus one column for a sign.
fn cell_width(tree: &OrderedTree) -> usize {
    [tree.get_min(), tree.get_max()]
        .into_iter()
        .flatten()
        .map(|e| e.key.unsigned_abs().to_string().len() + 1)
        .max()
        .unwrap_or(1)
}

fn pad(line: &mut String, fill: char, count: usize) {
    line.extend(std::iter::repeat(fill).take(count));
}
