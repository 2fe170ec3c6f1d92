//! Tree rendering for debugging and inspection.
//!
//! Three formats: a depth-first node dump, the same traversal as a
//! Graphviz digraph, and the leaf contents alone in key order. Key and
//! value bytes are rendered as lossy UTF-8.

use std::io;

use crate::error::{Error, Result};
use crate::storage::BufferCache;

use super::node::{Node, NodeType};
use super::tree::BTreeIndex;

/// Output format for [`BTreeIndex::display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// One line per node, depth first.
    Depth,
    /// Graphviz digraph of the node structure.
    DepthDot,
    /// `(key,value)` lines in ascending key order.
    SortedKeyval,
}

impl<'a, C: BufferCache> BTreeIndex<'a, C> {
    /// Renders the tree to `out` in the requested format.
    pub fn display<W: io::Write>(&self, out: &mut W, mode: DisplayMode) -> Result<()> {
        if mode == DisplayMode::DepthDot {
            writeln!(out, "digraph btree {{")?;
        }
        self.display_node(
            self.superblock.root_block(),
            out,
            mode,
            self.cache.num_blocks() as usize,
        )?;
        if mode == DisplayMode::DepthDot {
            writeln!(out, "}}")?;
        }
        Ok(())
    }

    fn display_node<W: io::Write>(
        &self,
        block: u32,
        out: &mut W,
        mode: DisplayMode,
        budget: usize,
    ) -> Result<()> {
        if budget == 0 {
            return Err(Error::Insane {
                reason: "display walk did not terminate",
            });
        }

        let node = Node::load(&*self.cache, block)?;
        match node.node_type() {
            NodeType::Root | NodeType::Interior => {
                match mode {
                    DisplayMode::Depth => {
                        write!(out, "{}: Interior:", block)?;
                        for i in 0..node.num_keys() {
                            write!(
                                out,
                                " *{} {}",
                                node.ptr_at(i)?,
                                String::from_utf8_lossy(node.key_at(i)?)
                            )?;
                        }
                        if node.num_keys() > 0 {
                            write!(out, " *{}", node.ptr_at(node.num_keys())?)?;
                        }
                        writeln!(out)?;
                    }
                    DisplayMode::DepthDot => {
                        let mut label = String::new();
                        for i in 0..node.num_keys() {
                            if i > 0 {
                                label.push(' ');
                            }
                            label.push_str(&String::from_utf8_lossy(node.key_at(i)?));
                        }
                        writeln!(out, "  {} [ label=\"{}: {}\" ];", block, block, label)?;
                    }
                    DisplayMode::SortedKeyval => {}
                }

                if node.num_keys() > 0 {
                    for i in 0..=node.num_keys() {
                        let child = node.ptr_at(i)?;
                        if mode == DisplayMode::DepthDot {
                            writeln!(out, "  {} -> {};", block, child)?;
                        }
                        self.display_node(child, out, mode, budget - 1)?;
                    }
                }
            }
            NodeType::Leaf => match mode {
                DisplayMode::Depth => {
                    write!(out, "{}: Leaf:", block)?;
                    for i in 0..node.num_keys() {
                        write!(
                            out,
                            " {}={}",
                            String::from_utf8_lossy(node.key_at(i)?),
                            String::from_utf8_lossy(node.value_at(i)?)
                        )?;
                    }
                    writeln!(out)?;
                }
                DisplayMode::DepthDot => {
                    let mut label = String::new();
                    for i in 0..node.num_keys() {
                        if i > 0 {
                            label.push(' ');
                        }
                        label.push_str(&String::from_utf8_lossy(node.key_at(i)?));
                    }
                    writeln!(out, "  {} [ label=\"{}: {}\" ];", block, block, label)?;
                }
                DisplayMode::SortedKeyval => {
                    for i in 0..node.num_keys() {
                        writeln!(
                            out,
                            "({},{})",
                            String::from_utf8_lossy(node.key_at(i)?),
                            String::from_utf8_lossy(node.value_at(i)?)
                        )?;
                    }
                }
            },
            _ => {
                return Err(Error::Insane {
                    reason: "display reached a node outside the tree",
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;

    fn small_tree(cache: &mut MemoryCache) -> BTreeIndex<'_, MemoryCache> {
        let mut tree = BTreeIndex::new(8, 8, cache, false);
        tree.attach(0, true).unwrap();
        for i in 0..3 {
            let key = format!("key{:05}", i);
            let val = format!("val{:05}", i);
            tree.insert(key.as_bytes(), val.as_bytes()).unwrap();
        }
        tree
    }

    fn render(tree: &BTreeIndex<'_, MemoryCache>, mode: DisplayMode) -> String {
        let mut out = Vec::new();
        tree.display(&mut out, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn depth_mode_lists_every_node() {
        let mut cache = MemoryCache::new(256, 64);
        let tree = small_tree(&mut cache);

        let text = render(&tree, DisplayMode::Depth);
        assert!(text.contains("Interior:"));
        assert!(text.contains("Leaf:"));
        assert!(text.contains("key00000=val00000"));
    }

    #[test]
    fn dot_mode_emits_a_digraph() {
        let mut cache = MemoryCache::new(256, 64);
        let tree = small_tree(&mut cache);

        let text = render(&tree, DisplayMode::DepthDot);
        assert!(text.starts_with("digraph btree {"));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("->"));
    }

    #[test]
    fn sorted_mode_lists_pairs_in_key_order() {
        let mut cache = MemoryCache::new(256, 64);
        let tree = small_tree(&mut cache);

        let text = render(&tree, DisplayMode::SortedKeyval);
        assert_eq!(
            text,
            "(key00000,val00000)\n(key00001,val00001)\n(key00002,val00002)\n"
        );
    }

    #[test]
    fn empty_tree_renders_nothing_sorted() {
        let mut cache = MemoryCache::new(256, 64);
        let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
        tree.attach(0, true).unwrap();

        assert_eq!(render(&tree, DisplayMode::SortedKeyval), "");
    }
}
