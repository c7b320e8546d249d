//! Layout Engine
//!
//! Walks the content tree depth first, creating boxes in the [`BoxTree`]
//! and keeping the render context in step with element nesting.
//!
//! Inline content is collected into the owner's *open line*: a line box that
//! accepts content until it is closed, either because text wrapped or because
//! block content follows. Closing a line sizes and aligns it and moves the
//! owner's cursor below it.

use lintel_dom::{DomError, DomTree, IntrinsicSize, Node, NodeId, NodeType};
use lintel_style::{ComputedStyle, Display, Float, Length, Position, StyleTree};

use crate::block::{self, ContainingBlock};
use crate::boxes::{BoxId, BoxKind, BoxTree, LayoutBox, TextFragment};
use crate::context::RenderContext;
use crate::error::{LayoutError, LayoutResult};
use crate::fixed::FixedPoint;
use crate::float::FloatEntry;
use crate::font::FontProvider;
use crate::geometry::Point;
use crate::inline;
use crate::text::{self, BandQuery, TextRun};

/// Settings for a layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Device resolution in dots per inch
    pub dpi: f64,
    /// Width of the initial containing block, in device units
    pub viewport_width: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            viewport_width: 1024.0,
        }
    }
}

/// Result of a layout pass
#[derive(Debug, Clone)]
pub struct LayoutTree {
    pub boxes: BoxTree,
    pub root: BoxId,
}

impl LayoutTree {
    pub fn root_box(&self) -> &LayoutBox {
        &self.boxes[self.root]
    }

    /// Pretty print the whole tree for debugging
    pub fn pretty_print(&self) -> String {
        self.boxes.pretty_print(self.root)
    }
}

/// Lay out the body of `dom` with the given styles and fonts
pub fn layout_document(
    dom: &DomTree,
    styles: &StyleTree,
    fonts: &dyn FontProvider,
    options: &LayoutOptions,
) -> LayoutResult<LayoutTree> {
    let body = dom
        .find_first(|node| node.has_tag("body"))
        .or_else(|| {
            dom.children(dom.document_id())
                .into_iter()
                .find(|&child| dom.get(child).is_some_and(Node::is_element))
        })
        .ok_or(LayoutError::NoBody)?;

    let mut engine = LayoutEngine::new(dom, styles, fonts, options.dpi);
    let containing = ContainingBlock::new(FixedPoint::from_f64(options.viewport_width), FixedPoint::ZERO);
    engine.format_node(body, None, containing)?;

    let tree = engine.finish()?;
    log::debug!("layout produced {} boxes", tree.boxes.len());
    Ok(tree)
}

/// State of one layout pass
pub struct LayoutEngine<'a> {
    dom: &'a DomTree,
    styles: &'a StyleTree,
    fonts: &'a dyn FontProvider,
    ctx: RenderContext<'a>,
    boxes: BoxTree,
    root: Option<BoxId>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(dom: &'a DomTree, styles: &'a StyleTree, fonts: &'a dyn FontProvider, dpi: f64) -> Self {
        Self {
            dom,
            styles,
            fonts,
            ctx: RenderContext::new(dpi, styles.default_style(), fonts),
            boxes: BoxTree::new(),
            root: None,
        }
    }

    pub fn context(&self) -> &RenderContext<'a> {
        &self.ctx
    }

    pub fn boxes(&self) -> &BoxTree {
        &self.boxes
    }

    pub fn root(&self) -> Option<BoxId> {
        self.root
    }

    /// Hand over the finished tree
    pub fn finish(self) -> LayoutResult<LayoutTree> {
        let root = self.root.ok_or(LayoutError::NoBody)?;
        Ok(LayoutTree { boxes: self.boxes, root })
    }

    /// Run `f` with the element's frame on top of the render context.
    ///
    /// The frame is popped whether or not `f` succeeds.
    fn with_node_context<T>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut Self) -> LayoutResult<T>,
    ) -> LayoutResult<T> {
        let styles = self.styles;
        let is_element = self.dom.get(node).is_some_and(Node::is_element);
        if is_element {
            self.ctx.push(styles.style_or_default(node), self.fonts);
        }
        let result = f(self);
        if is_element {
            self.ctx.pop();
        }
        result
    }

    /// Lay out `node` inside `parent`, returning the box it generated.
    ///
    /// Without a parent the node becomes the root block.
    pub fn format_node(
        &mut self,
        node: NodeId,
        parent: Option<BoxId>,
        containing: ContainingBlock,
    ) -> LayoutResult<Option<BoxId>> {
        let dom = self.dom;
        let n = dom.get(node).ok_or(DomError::NodeNotFound(node.as_u32()))?;
        match &n.node_type {
            NodeType::Element(_) => {
                self.with_node_context(node, |engine| engine.format_element(node, parent, containing))
            }
            NodeType::Text(content) => {
                let owner = parent.ok_or(LayoutError::UnhandledNode(node))?;
                self.layout_inline_text(node, content, owner)?;
                Ok(None)
            }
            NodeType::Document => Err(LayoutError::UnhandledNode(node)),
        }
    }

    fn format_element(
        &mut self,
        node: NodeId,
        parent: Option<BoxId>,
        containing: ContainingBlock,
    ) -> LayoutResult<Option<BoxId>> {
        let style = self.ctx.style();
        log::trace!("formatting {} as {}", node, style.display.as_str());

        if style.display == Display::None {
            return Ok(None);
        }

        if let Some(parent) = parent {
            if style.is_out_of_flow() {
                match style.position {
                    Position::Fixed => self.add_fixed(node, parent),
                    _ => self.add_absolute(node, parent),
                }
                return Ok(None);
            }
            if style.is_floated() {
                return self.layout_float(node, parent, style, containing).map(Some);
            }
        }

        if style.display == Display::ListItem || style.display.is_table() {
            return Err(LayoutError::Unsupported { display: style.display.as_str() });
        }

        let Some(parent) = parent else {
            return self.layout_block_box(node, None, containing).map(Some);
        };

        match style.display {
            Display::Block => {
                if self.boxes[parent].open_line.is_some() {
                    self.close_open_box(parent)?;
                }
                let id = self.layout_block_box(node, Some(parent), containing)?;
                self.advance_past_block(parent, id);
                Ok(Some(id))
            }
            Display::Inline => self.layout_inline_element(node, parent).map(Some),
            Display::InlineBlock => self.layout_inline_block(node, parent, style).map(Some),
            other => Err(LayoutError::Unsupported { display: other.as_str() }),
        }
    }

    /// Create a box that takes its alignment from the current frame
    fn new_box(&mut self, kind: BoxKind, node: Option<NodeId>, parent: Option<BoxId>) -> BoxId {
        let style = self.ctx.style();
        let mut layout_box = LayoutBox::new(kind, node, parent);
        layout_box.text_align = style.text_align;
        layout_box.direction = style.direction;
        self.boxes.push(layout_box)
    }

    fn layout_block_box(
        &mut self,
        node: NodeId,
        parent: Option<BoxId>,
        containing: ContainingBlock,
    ) -> LayoutResult<BoxId> {
        let id = self.new_box(BoxKind::Block, Some(node), parent);
        match parent {
            Some(parent) => self.boxes.append_child(parent, id),
            None if self.root.is_none() => self.root = Some(id),
            None => {}
        }
        self.layout_block(id, containing)?;
        Ok(id)
    }

    /// Block layout: width, position below the parent's cursor, children,
    /// then height.
    fn layout_block(&mut self, id: BoxId, containing: ContainingBlock) -> LayoutResult<()> {
        let cursor_y = self.boxes[id].parent.map_or(FixedPoint::ZERO, |p| self.boxes[p].cursor.y);
        let d = &mut self.boxes[id].dimensions;
        block::calculate_block_width(&self.ctx, d, containing);
        block::calculate_block_position(&self.ctx, d, containing, cursor_y);

        self.layout_children(id, containing)?;

        block::calculate_block_height(&self.ctx, &mut self.boxes[id].dimensions, containing);
        Ok(())
    }

    /// Lay out the content children of `id`, then size it to them
    fn layout_children(&mut self, id: BoxId, containing: ContainingBlock) -> LayoutResult<()> {
        let height = block::explicit_height(&self.ctx, containing).unwrap_or(FixedPoint::ZERO);
        let child_containing = ContainingBlock::new(self.boxes[id].dimensions.content.width, height);
        self.boxes[id].cursor = Point::default();

        if let Some(node) = self.boxes[id].node {
            for child in self.dom.children(node) {
                self.format_node(child, Some(id), child_containing)?;
            }
        }
        if self.boxes[id].open_line.is_some() {
            self.close_open_box(id)?;
        }

        self.boxes[id].dimensions.content.height = block::content_bottom(&self.boxes, id);
        Ok(())
    }

    /// Move the parent's cursor below a finished block child
    fn advance_past_block(&mut self, parent: BoxId, child: BoxId) {
        let bottom = self.boxes[child].dimensions.margin_box_bottom();
        let line_height = self.ctx.line_height();
        let p = &mut self.boxes[parent];
        p.cursor.y = bottom;
        p.cursor.x = p.float_ledger.available_left_offset(bottom, line_height);
    }

    /// The open line of `owner`, creating one at its cursor if needed.
    ///
    /// The line is refitted to the room beside floats at the cursor.
    pub fn get_open_box(&mut self, owner: BoxId) -> BoxId {
        let line = match self.boxes[owner].open_line {
            Some(line) => line,
            None => {
                let line = self.boxes.push(LayoutBox::new(BoxKind::Line, None, Some(owner)));
                self.boxes.append_child(owner, line);
                self.boxes[owner].open_line = Some(line);
                line
            }
        };
        self.refit_line(owner, line);
        line
    }

    fn refit_line(&mut self, owner: BoxId, line: BoxId) {
        let line_height = self.ctx.line_height();
        let o = &self.boxes[owner];
        let y = o.cursor.y;
        let x = o.float_ledger.available_left_offset(y, line_height);
        let width = o.float_ledger.available_width(y, line_height, o.dimensions.content.width);

        let content = &mut self.boxes[line].dimensions.content;
        content.x = x;
        content.y = y;
        content.width = width;
    }

    /// Close the open line of `owner` and move its cursor below the line.
    ///
    /// An empty line is dropped without advancing.
    pub fn close_open_box(&mut self, owner: BoxId) -> LayoutResult<()> {
        let line = self.boxes[owner].open_line.take().ok_or(LayoutError::NoOpenLine(owner))?;
        if !self.boxes[line].is_line() {
            return Err(LayoutError::NotALineBox(line));
        }

        if self.boxes[line].children.is_empty() {
            self.boxes[owner].children.retain(|&child| child != line);
            return Ok(());
        }

        let (align, direction) = (self.boxes[owner].text_align, self.boxes[owner].direction);
        let height = inline::finish_line(&mut self.boxes, line, &self.ctx, align, direction);

        let next_line_height = self.ctx.line_height();
        let o = &mut self.boxes[owner];
        o.cursor.y += height;
        o.cursor.x = o.float_ledger.available_left_offset(o.cursor.y, next_line_height);
        log::debug!("closed {} in {}, line height {}", line, owner, height);
        Ok(())
    }

    /// Reflow a text node into text boxes on the owner's lines
    fn layout_inline_text(&mut self, node: NodeId, content: &str, owner: BoxId) -> LayoutResult<()> {
        let run = TextRun::new(content);
        if run.is_empty() {
            return Ok(());
        }

        let font = self.ctx.font();
        let line_height = self.ctx.line_height();
        let style = self.ctx.style();

        let line = self.get_open_box(owner);
        let start = Point::new(self.boxes[line].cursor.x, self.boxes[owner].cursor.y);
        let placed = {
            let o = &self.boxes[owner];
            let query = BandQuery {
                ledger: &o.float_ledger,
                container_width: o.dimensions.content.width,
            };
            text::reflow_text(&run, font.as_ref(), start, line_height, &query)?
        };

        for p in placed {
            if p.y > self.boxes[owner].cursor.y {
                // reflow moved below the current line
                if self.boxes[owner].open_line.is_some() {
                    self.close_open_box(owner)?;
                }
                let o = &mut self.boxes[owner];
                o.cursor.y = o.cursor.y.max(p.y);
            }

            let line = self.get_open_box(owner);
            let width = p.line.width();
            let is_end_line = p.line.is_end_line;
            let fragment = TextFragment {
                line: p.line,
                offset: Point::new(p.x, FixedPoint::ZERO),
                width,
                height: line_height,
                baseline: line_height,
                descender: font.descender(),
                color: style.color,
                vertical_align: style.vertical_align,
            };
            let id = self.boxes.push(LayoutBox::new(BoxKind::Text(fragment), Some(node), Some(line)));
            self.boxes.append_child(line, id);
            self.boxes[id].layout_text();
            self.boxes[line].cursor.x = p.x + width;

            if is_end_line {
                self.close_open_box(owner)?;
            }
        }
        Ok(())
    }

    /// An inline element lays its content out in the rest of the open line,
    /// then shrinks to the extent of that content and advances the line's
    /// cursor past it.
    fn layout_inline_element(&mut self, node: NodeId, owner: BoxId) -> LayoutResult<BoxId> {
        let line = self.get_open_box(owner);
        let id = self.new_box(BoxKind::InlineElement, Some(node), Some(line));
        self.boxes.append_child(line, id);

        let cursor_x = self.boxes[line].cursor.x;
        let line_width = self.boxes[line].dimensions.content.width;
        let content = &mut self.boxes[id].dimensions.content;
        content.x = cursor_x;
        content.y = FixedPoint::ZERO;
        content.width = (line_width - cursor_x).non_negative();

        self.layout_children(id, ContainingBlock::new(line_width, FixedPoint::ZERO))?;

        let extent = block::shrink_to_fit(&self.boxes, id);
        self.boxes[id].dimensions.content.width = extent;
        self.boxes[line].cursor.x = cursor_x + extent;
        Ok(id)
    }

    fn layout_inline_block(
        &mut self,
        node: NodeId,
        owner: BoxId,
        style: &ComputedStyle,
    ) -> LayoutResult<BoxId> {
        let mut line = self.get_open_box(owner);
        let id = self.new_box(BoxKind::InlineBlock, Some(node), Some(line));
        self.boxes.append_child(line, id);

        let line_width = self.boxes[line].dimensions.content.width;
        let containing = ContainingBlock::new(line_width, FixedPoint::ZERO);
        let intrinsic = self.dom.get(node).and_then(Node::as_element).and_then(|e| e.intrinsic_size);

        match intrinsic {
            Some(size) => {
                self.boxes[id].replaced = true;
                self.layout_replaced(id, size, style, containing);
            }
            None => {
                let d = &mut self.boxes[id].dimensions;
                block::calculate_shrink_width(&self.ctx, d, containing);
                block::calculate_vertical_edges(&self.ctx, d, containing);
                self.layout_children(id, containing)?;
                if style.width.is_auto() {
                    self.boxes[id].dimensions.content.width = block::shrink_to_fit(&self.boxes, id);
                }
                block::calculate_block_height(&self.ctx, &mut self.boxes[id].dimensions, containing);
            }
        }

        let extent = self.boxes[id].dimensions.margin_box_width();
        let cursor_x = self.boxes[line].cursor.x;
        if cursor_x > FixedPoint::ZERO && cursor_x + extent > line_width {
            // wrap onto a fresh line
            self.boxes[line].children.retain(|&child| child != id);
            self.close_open_box(owner)?;
            line = self.get_open_box(owner);
            self.boxes.append_child(line, id);
        }

        let cursor_x = self.boxes[line].cursor.x;
        let d = &mut self.boxes[id].dimensions;
        d.content.x = cursor_x + d.mbp_left();
        // moved down onto the baseline when the line closes
        d.content.y = -d.content.height;
        self.boxes[line].cursor.x = cursor_x + extent;
        Ok(id)
    }

    /// Replaced content keeps its natural size unless the style sets one
    fn layout_replaced(
        &mut self,
        id: BoxId,
        size: IntrinsicSize,
        style: &ComputedStyle,
        containing: ContainingBlock,
    ) {
        let natural_width = self.ctx.resolve(&Length::px(f64::from(size.width)), FixedPoint::ZERO);
        let natural_height = self.ctx.resolve(&Length::px(f64::from(size.height)), FixedPoint::ZERO);

        let d = &mut self.boxes[id].dimensions;
        block::calculate_box_edges(&self.ctx, d, containing);
        d.content.width = match style.width.length() {
            Some(width) => self.ctx.resolve(width, containing.width),
            None => natural_width,
        };
        d.content.height = match style.height.length() {
            Some(height) => self.ctx.resolve(height, containing.height),
            None => natural_height,
        };
    }

    /// Place a float against the owner's edge and record it in the owner's
    /// ledger. Floats do not move the vertical cursor.
    fn layout_float(
        &mut self,
        node: NodeId,
        owner: BoxId,
        style: &ComputedStyle,
        containing: ContainingBlock,
    ) -> LayoutResult<BoxId> {
        let id = self.new_box(BoxKind::Block, Some(node), Some(owner));

        let cursor_y = self.boxes[owner].cursor.y;
        let d = &mut self.boxes[id].dimensions;
        block::calculate_shrink_width(&self.ctx, d, containing);
        block::calculate_block_position(&self.ctx, d, containing, cursor_y);
        self.layout_children(id, containing)?;
        if style.width.is_auto() {
            self.boxes[id].dimensions.content.width = block::shrink_to_fit(&self.boxes, id);
        }
        block::calculate_block_height(&self.ctx, &mut self.boxes[id].dimensions, containing);

        let line_height = self.ctx.line_height();
        let o = &self.boxes[owner];
        let container_width = o.dimensions.content.width;
        let left_offset = o.float_ledger.available_left_offset(cursor_y, line_height);
        let right_offset = o.float_ledger.available_right_offset(cursor_y, line_height);

        let d = self.boxes[id].dimensions;
        let x = match style.float {
            Float::Right => container_width - right_offset - d.margin_box_width(),
            _ => left_offset,
        };
        self.boxes[id].dimensions.content.x = x + d.mbp_left();

        let entry = FloatEntry {
            owner: id,
            top: cursor_y,
            mbp_height: d.mbp_height(),
            mbp_width: d.mbp_width(),
            content_height: d.content.height,
            content_width: d.content.width,
        };
        let o = &mut self.boxes[owner];
        match style.float {
            Float::Right => o.float_ledger.add_right(entry),
            _ => o.float_ledger.add_left(entry),
        }
        o.floats.push(id);
        o.cursor.x = o.float_ledger.available_left_offset(o.cursor.y, line_height);
        log::debug!("placed {:?} float {} at x={}", style.float, id, x);

        if let Some(line) = o.open_line {
            self.refit_line(owner, line);
        }
        Ok(id)
    }

    fn add_absolute(&mut self, node: NodeId, parent: BoxId) {
        let id = self.new_box(BoxKind::Absolute, Some(node), Some(parent));
        self.boxes[parent].absolutes.push(id);
        log::trace!("layout of absolutely positioned {} is not implemented", node);
    }

    fn add_fixed(&mut self, node: NodeId, parent: BoxId) {
        let root = self.root.unwrap_or(parent);
        let id = self.new_box(BoxKind::Fixed, Some(node), Some(root));
        self.boxes[root].fixed.push(id);
        log::trace!("layout of fixed {} is not implemented", node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::SimpleFontProvider;

    fn px(v: i32) -> FixedPoint {
        FixedPoint::from_px(v)
    }

    /// A document with an empty body
    fn document() -> (DomTree, NodeId) {
        let mut dom = DomTree::new();
        let html = dom.append_element(dom.document_id(), "html").unwrap();
        let body = dom.append_element(html, "body").unwrap();
        (dom, body)
    }

    fn styled(dom: &mut DomTree, parent: NodeId, tag: &str, style: &str) -> NodeId {
        let id = dom.append_element(parent, tag).unwrap();
        dom.get_mut(id).and_then(|n| n.as_element_mut()).unwrap().set_attribute("style", style);
        id
    }

    fn set_style(dom: &mut DomTree, node: NodeId, style: &str) {
        dom.get_mut(node).and_then(|n| n.as_element_mut()).unwrap().set_attribute("style", style);
    }

    /// Lay out at 96 dpi, where 1px is one device unit, with 10 wide glyphs
    /// and 5 wide spaces.
    fn layout(dom: &DomTree, width: f64) -> LayoutResult<LayoutTree> {
        let styles = StyleTree::from_style_attributes(dom);
        let fonts = SimpleFontProvider::fixed(10.0, 5.0);
        let options = LayoutOptions { dpi: 96.0, viewport_width: width };
        layout_document(dom, &styles, &fonts, &options)
    }

    fn find_box(tree: &LayoutTree, node: NodeId) -> BoxId {
        let mut found = None;
        tree.boxes.pre_order(tree.root, &mut |id, b, _| {
            if found.is_none() && b.node == Some(node) {
                found = Some(id);
            }
        });
        found.unwrap()
    }

    #[test]
    fn test_block_children_stack() {
        let (mut dom, body) = document();
        let centered = styled(&mut dom, body, "div", "width: 100px; height: 50px; margin: 0 auto");
        let full = styled(&mut dom, body, "div", "height: 20px");

        let tree = layout(&dom, 300.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.dimensions.content.width, px(300));
        assert_eq!(root.dimensions.content.height, px(70));

        let c = &tree.boxes[find_box(&tree, centered)].dimensions;
        assert_eq!(c.content.width, px(100));
        assert_eq!(c.margin.left, px(100));
        assert_eq!(c.margin.right, px(100));
        assert_eq!(c.content.x, px(100));

        let f = &tree.boxes[find_box(&tree, full)].dimensions;
        assert_eq!(f.content.width, px(300));
        assert_eq!(f.content.y, px(50));
    }

    #[test]
    fn test_auto_width_and_margins_fill_root() {
        let (mut dom, body) = document();
        let child = styled(&mut dom, body, "div", "width: auto; margin-left: auto; margin-right: auto");

        let tree = layout(&dom, 300.0).unwrap();
        let d = &tree.boxes[find_box(&tree, child)].dimensions;
        assert_eq!(d.content.width, px(300));
        assert_eq!(d.margin.left, FixedPoint::ZERO);
        assert_eq!(d.margin.right, FixedPoint::ZERO);
        assert_eq!(d.content.x, FixedPoint::ZERO);
    }

    #[test]
    fn test_display_none_skips_children() {
        let (mut dom, body) = document();
        let hidden = styled(&mut dom, body, "div", "display: none");
        dom.append_element(hidden, "table").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        assert!(tree.root_box().children.is_empty());
        assert_eq!(tree.boxes.len(), 1);
    }

    #[test]
    fn test_table_is_unsupported() {
        let (mut dom, body) = document();
        dom.append_element(body, "table").unwrap();
        let err = layout(&dom, 300.0).unwrap_err();
        assert!(matches!(err, LayoutError::Unsupported { display: "table" }));

        let (mut dom, body) = document();
        dom.append_element(body, "li").unwrap();
        let err = layout(&dom, 300.0).unwrap_err();
        assert!(matches!(err, LayoutError::Unsupported { display: "list-item" }));
    }

    #[test]
    fn test_context_unwinds() {
        let (mut dom, body) = document();
        let outer = styled(&mut dom, body, "div", "font-size: larger");
        let inner = dom.append_element(outer, "span").unwrap();
        dom.append_text(inner, "deep text").unwrap();

        let styles = StyleTree::from_style_attributes(&dom);
        let fonts = SimpleFontProvider::new();
        let mut engine = LayoutEngine::new(&dom, &styles, &fonts, 96.0);
        let containing = ContainingBlock::new(px(300), FixedPoint::ZERO);
        engine.format_node(body, None, containing).unwrap();
        assert_eq!(engine.context().depth(), 1);

        // the pass closed every line it opened
        let root = engine.root().unwrap();
        assert!(matches!(engine.close_open_box(root), Err(LayoutError::NoOpenLine(_))));
    }

    #[test]
    fn test_context_unwinds_on_error() {
        let (mut dom, body) = document();
        let outer = dom.append_element(body, "div").unwrap();
        dom.append_element(outer, "table").unwrap();

        let styles = StyleTree::from_style_attributes(&dom);
        let fonts = SimpleFontProvider::new();
        let mut engine = LayoutEngine::new(&dom, &styles, &fonts, 96.0);
        let containing = ContainingBlock::new(px(300), FixedPoint::ZERO);
        assert!(engine.format_node(body, None, containing).is_err());
        assert_eq!(engine.context().depth(), 1);
    }

    #[test]
    fn test_out_of_flow_boxes_are_recorded() {
        let (mut dom, body) = document();
        let wrapper = dom.append_element(body, "div").unwrap();
        let absolute = styled(&mut dom, wrapper, "div", "position: absolute");
        dom.append_text(absolute, "never laid out").unwrap();
        let fixed = styled(&mut dom, wrapper, "div", "position: fixed");

        let tree = layout(&dom, 300.0).unwrap();
        let w = &tree.boxes[find_box(&tree, wrapper)];
        assert!(w.children.is_empty());
        assert_eq!(w.absolutes.len(), 1);
        assert_eq!(tree.boxes[w.absolutes[0]].node, Some(absolute));
        assert!(matches!(tree.boxes[w.absolutes[0]].kind, BoxKind::Absolute));

        let root = tree.root_box();
        assert_eq!(root.fixed.len(), 1);
        assert_eq!(tree.boxes[root.fixed[0]].node, Some(fixed));
        assert_eq!(root.dimensions.content.height, FixedPoint::ZERO);
    }

    #[test]
    fn test_position_is_resolved_before_display() {
        let (mut dom, body) = document();
        let absolute = styled(&mut dom, body, "div", "position: absolute; display: table");
        dom.append_text(absolute, "x").unwrap();
        let fixed = styled(&mut dom, body, "li", "position: fixed");
        let float = styled(&mut dom, body, "div", "float: left; display: table-cell; width: 40px");

        let tree = layout(&dom, 300.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.absolutes.len(), 1);
        assert_eq!(tree.boxes[root.absolutes[0]].node, Some(absolute));
        assert_eq!(root.fixed.len(), 1);
        assert_eq!(tree.boxes[root.fixed[0]].node, Some(fixed));
        assert_eq!(root.floats.len(), 1);
        assert_eq!(tree.boxes[root.floats[0]].node, Some(float));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_text_wraps_into_lines() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        dom.append_text(body, "aaa aaa aaa aaa").unwrap();

        let tree = layout(&dom, 100.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.dimensions.content.height, px(40));

        let first = &tree.boxes[root.children[0]];
        assert!(first.is_line());
        assert_eq!(first.dimensions.content.width, px(100));
        let fragment = tree.boxes[first.children[0]].text().unwrap();
        assert_eq!(fragment.line.words.len(), 3);

        let second = &tree.boxes[root.children[1]];
        assert_eq!(second.dimensions.content.y, px(20));
        assert_eq!(second.dimensions.content.width, px(30));
    }

    #[test]
    fn test_block_closes_open_line() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        dom.append_text(body, "hi").unwrap();
        let after = styled(&mut dom, body, "div", "height: 10px");

        let tree = layout(&dom, 300.0).unwrap();
        assert_eq!(tree.boxes[find_box(&tree, after)].dimensions.content.y, px(20));
        assert_eq!(tree.root_box().dimensions.content.height, px(30));
    }

    #[test]
    fn test_text_flows_beside_float() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        let float = styled(&mut dom, body, "div", "float: left; width: 100px; height: 50px");
        dom.append_text(body, "aaa").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.floats.len(), 1);
        assert_eq!(root.float_ledger.left().len(), 1);
        assert_eq!(tree.boxes[root.floats[0]].node, Some(float));

        // the float is not part of the normal flow
        assert_eq!(root.children.len(), 1);
        let line = &tree.boxes[root.children[0]];
        assert_eq!(line.dimensions.content.x, px(100));
        assert_eq!(root.dimensions.content.height, px(20));
    }

    #[test]
    fn test_text_clears_tall_float() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        styled(&mut dom, body, "div", "float: left; width: 100px; height: 2000px");
        dom.append_text(body, "aaaaaa").unwrap();

        let tree = layout(&dom, 150.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.children.len(), 1);
        let line = &tree.boxes[root.children[0]];
        assert_eq!(line.dimensions.content.y, px(2000));
        assert_eq!(line.dimensions.content.x, FixedPoint::ZERO);
        assert_eq!(root.dimensions.content.height, px(2020));
    }

    #[test]
    fn test_cursor_after_line_uses_own_line_height() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        styled(&mut dom, body, "div", "float: left; width: 50px; height: 100px");
        // an empty inline element makes a line of height zero
        dom.append_element(body, "span").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let root = tree.root_box();
        assert_eq!(root.cursor.y, FixedPoint::ZERO);
        assert_eq!(root.cursor.x, px(50));
    }

    #[test]
    fn test_right_float_position() {
        let (mut dom, body) = document();
        let float = styled(&mut dom, body, "div", "float: right; width: 80px; height: 10px");

        let tree = layout(&dom, 300.0).unwrap();
        let f = &tree.boxes[find_box(&tree, float)];
        assert_eq!(f.dimensions.content.x, px(220));
        assert_eq!(f.dimensions.content.width, px(80));
    }

    #[test]
    fn test_inline_block_sits_on_line() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        dom.append_text(body, "ab ").unwrap();
        let img = dom.create_replaced("img", 40.0, 30.0);
        dom.append_child(body, img).unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let root = tree.root_box();
        let line = &tree.boxes[root.children[0]];
        assert_eq!(line.dimensions.content.height, px(30));
        assert_eq!(line.dimensions.content.width, px(65));

        let image = &tree.boxes[find_box(&tree, img)];
        assert!(matches!(image.kind, BoxKind::InlineBlock));
        assert_eq!(image.dimensions.content.x, px(25));
        assert_eq!(image.dimensions.content.y, FixedPoint::ZERO);
        assert_eq!(image.dimensions.content.width, px(40));
        assert!(image.replaced);
        assert_eq!(root.dimensions.content.height, px(30));

        // the text's baseline meets the image's bottom edge
        let text = &tree.boxes[line.children[0]];
        assert_eq!(text.dimensions.content.y, px(10));
        assert_eq!(text.text().map(|f| f.baseline), Some(px(20)));
    }

    #[test]
    fn test_inline_element_advances_line() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        dom.append_text(body, "aa ").unwrap();
        let span = dom.append_element(body, "span").unwrap();
        dom.append_text(span, "bb").unwrap();
        let tail = dom.append_text(body, " cc").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let s = &tree.boxes[find_box(&tree, span)];
        assert!(matches!(s.kind, BoxKind::InlineElement));
        assert_eq!(s.dimensions.content.x, px(25));

        let t = &tree.boxes[find_box(&tree, tail)];
        assert_eq!(t.dimensions.content.x, px(45));
        assert_eq!(tree.root_box().children.len(), 1);
    }

    #[test]
    fn test_inline_element_shrinks_to_content() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "line-height: 20px");
        dom.append_text(body, "aa ").unwrap();
        let span = dom.append_element(body, "span").unwrap();
        dom.append_text(span, "bb").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let s = &tree.boxes[find_box(&tree, span)];
        assert_eq!(s.dimensions.content.x, px(25));
        assert_eq!(s.dimensions.content.width, px(20));
        assert_eq!(s.dimensions.content.height, px(20));

        let line = &tree.boxes[tree.root_box().children[0]];
        assert_eq!(line.dimensions.content.width, px(45));
    }

    #[test]
    fn test_text_align_center() {
        let (mut dom, body) = document();
        set_style(&mut dom, body, "text-align: center");
        dom.append_text(body, "aaa").unwrap();

        let tree = layout(&dom, 300.0).unwrap();
        let line = &tree.boxes[tree.root_box().children[0]];
        assert_eq!(line.dimensions.content.x, px(135));
    }

    #[test]
    fn test_unhandled_and_missing_nodes() {
        let (dom, _) = document();
        let styles = StyleTree::from_style_attributes(&dom);
        let fonts = SimpleFontProvider::new();
        let mut engine = LayoutEngine::new(&dom, &styles, &fonts, 96.0);
        let containing = ContainingBlock::default();

        let err = engine.format_node(dom.document_id(), None, containing).unwrap_err();
        assert!(matches!(err, LayoutError::UnhandledNode(_)));
        let err = engine.format_node(NodeId::new(999), None, containing).unwrap_err();
        assert!(matches!(err, LayoutError::Dom(DomError::NodeNotFound(999))));
    }

    #[test]
    fn test_no_body() {
        let dom = DomTree::new();
        assert!(matches!(layout(&dom, 300.0), Err(LayoutError::NoBody)));
    }
}
