use crate::error::DomError;
use crate::event::ScrollIntoViewOptions;
use crate::mutation::{MutationObserverInit, MutationRecord, Observer, ObserverId};
use crate::node::{Element, NodeId};
use crate::selector::Selector;

/// An element tree with focus tracking and attribute observers.
///
/// Elements live in an arena and are addressed by [`NodeId`]. Removing an
/// element detaches it from its parent but keeps it addressable, which is
/// what lets a template node be cloned after it has been taken out of the
/// page.
///
/// # Example
///
/// ```
/// use dialcode_dom::{Document, Selector};
///
/// let mut doc = Document::new();
/// let body = doc.root();
/// let list = doc.create_child(body, "div", &[("id", "list")]).unwrap();
/// doc.create_child(list, "a", &[("class", "item")]).unwrap();
///
/// assert_eq!(doc.get_element_by_id("list"), Some(list));
/// assert!(doc.query_selector(list, &Selector::class("item")).is_some());
/// ```
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    active: Option<NodeId>,
    last_scroll: Option<(NodeId, ScrollIntoViewOptions)>,
    observers: Vec<Observer>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document whose root is a `body` element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
            active: None,
            last_scroll: None,
            observers: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Elements held by the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow an element, if the id belongs to this document.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.index())
    }

    fn get(&self, node: NodeId) -> Result<&Element, DomError> {
        self.nodes.get(node.index()).ok_or(DomError::UnknownNode(node))
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(node.index())
            .ok_or(DomError::UnknownNode(node))
    }

    // --- Tree structure ---

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element::new(tag));
        id
    }

    /// Create an element with the given attributes and append it to `parent`.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        self.get(parent)?;
        let child = self.create_element(tag);
        {
            let el = self.get_mut(child)?;
            for (name, value) in attributes {
                el.set_attribute(name, value);
            }
        }
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Append `child` as the last child of `parent`, detaching it first if it
    /// already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get(parent)?;
        self.get(child)?;
        if self.contains(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child)?;
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `node` from its parent. Focus inside the removed subtree is lost.
    ///
    /// The subtree stays in the arena; nothing is ever freed.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.detach(node)?;
        if let Some(active) = self.active {
            if self.contains(node, active) {
                self.active = None;
            }
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.get(node)?.parent {
            self.get_mut(parent)?.children.retain(|c| *c != node);
            self.get_mut(node)?.parent = None;
        }
        Ok(())
    }

    /// Copy `node` (and, when `deep`, its whole subtree) into a new detached
    /// element.
    pub fn clone_node(&mut self, node: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let source = self.get(node)?;
        let mut copy = Element::new(&source.tag);
        copy.attributes = source.attributes.clone();
        copy.text = source.text.clone();
        let children = if deep { source.children.clone() } else { Vec::new() };

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(copy);
        for child in children {
            let child_copy = self.clone_node(child, true)?;
            self.append_child(id, child_copy)?;
        }
        Ok(id)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map_or(&[], |el| el.children.as_slice())
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `node` is attached to the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let pos = siblings.iter().position(|c| *c == node)?;
        siblings.get(pos + 1).copied()
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let pos = siblings.iter().position(|c| *c == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    // --- Queries ---

    /// Descendants of `scope` in document order, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|n| {
            self.element(*n)
                .is_some_and(|el| selector.matches(el))
        })
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    /// Connected element whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let selector = Selector::id(id);
        if self.element(self.root).is_some_and(|el| selector.matches(el)) {
            return Some(self.root);
        }
        self.query_selector(self.root, &selector)
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element(node).is_some_and(|el| selector.matches(el))
    }

    // --- Attributes ---

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.attribute(name))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let old = self.get_mut(node)?.set_attribute(name, value);
        self.record(node, name, old);
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        if let Some(old) = self.get_mut(node)?.remove_attribute(name) {
            self.record(node, name, Some(old));
        }
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(class))
    }

    /// Add `class` to the class list. Adding a present class changes nothing.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.get(node)?;
        if el.has_class(class) {
            return Ok(());
        }
        let mut tokens: Vec<&str> = el.classes().collect();
        tokens.push(class);
        let value = tokens.join(" ");
        self.set_attribute(node, "class", &value)
    }

    /// Remove `class` from the class list. Removing an absent class changes nothing.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.get(node)?;
        if !el.has_class(class) {
            return Ok(());
        }
        let value = el
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &value)
    }

    /// Flip `class`; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> Result<bool, DomError> {
        if self.get(node)?.has_class(class) {
            self.remove_class(node, class)?;
            Ok(false)
        } else {
            self.add_class(node, class)?;
            Ok(true)
        }
    }

    // --- Text ---

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = self
            .element(node)
            .map(|el| el.text.clone())
            .unwrap_or_default();
        for child in self.descendants(node) {
            if let Some(el) = self.element(child) {
                out.push_str(&el.text);
            }
        }
        out
    }

    /// Replace the content of `node` with `text`, detaching its children.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.get_mut(node)?.children);
        for child in children {
            self.get_mut(child)?.parent = None;
        }
        self.get_mut(node)?.text = text.to_string();
        Ok(())
    }

    // --- Focus and scrolling ---

    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move focus to `node`. Detached elements cannot take focus.
    pub fn focus(&mut self, node: NodeId) -> Result<(), DomError> {
        self.get(node)?;
        if self.is_connected(node) {
            self.active = Some(node);
        } else {
            log::debug!("ignoring focus on detached node {node:?}");
        }
        Ok(())
    }

    /// Drop focus from `node` if it currently has it.
    pub fn blur(&mut self, node: NodeId) {
        if self.active == Some(node) {
            self.active = None;
        }
    }

    pub fn scroll_into_view(
        &mut self,
        node: NodeId,
        options: ScrollIntoViewOptions,
    ) -> Result<(), DomError> {
        self.get(node)?;
        self.last_scroll = Some((node, options));
        Ok(())
    }

    /// The most recent scroll request, for renderers that follow it.
    pub fn last_scroll(&self) -> Option<(NodeId, ScrollIntoViewOptions)> {
        self.last_scroll
    }

    // --- Mutation observers ---

    /// Start recording mutations of `target` according to `init`.
    pub fn observe(&mut self, target: NodeId, init: MutationObserverInit) -> ObserverId {
        let id = ObserverId(self.observers.len());
        self.observers.push(Observer {
            target,
            init,
            records: Vec::new(),
            connected: true,
        });
        id
    }

    /// Take the queued records of an observer, oldest first.
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .get_mut(observer.0)
            .map(|o| std::mem::take(&mut o.records))
            .unwrap_or_default()
    }

    pub fn has_records(&self, observer: ObserverId) -> bool {
        self.observers
            .get(observer.0)
            .is_some_and(|o| !o.records.is_empty())
    }

    /// Stop recording and drop anything still queued.
    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(o) = self.observers.get_mut(observer.0) {
            o.connected = false;
            o.records.clear();
        }
    }

    fn record(&mut self, target: NodeId, attribute: &str, old: Option<String>) {
        for observer in self.observers.iter_mut().filter(|o| o.wants(target, attribute)) {
            let old_value = if observer.init.attribute_old_value {
                old.clone()
            } else {
                None
            };
            observer.records.push(MutationRecord {
                target,
                attribute_name: attribute.to_ascii_lowercase(),
                old_value,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ScrollBehavior, ScrollBlock};

    fn list_doc() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let list = doc.create_child(doc.root(), "div", &[("id", "list")]).unwrap();
        let items = (0..3)
            .map(|i| {
                let a = doc.create_child(list, "a", &[("class", "item")]).unwrap();
                doc.set_text_content(a, &format!("item {i}")).unwrap();
                a
            })
            .collect();
        (doc, list, items)
    }

    #[test]
    fn append_and_siblings() {
        let (doc, list, items) = list_doc();
        assert_eq!(doc.children(list), items.as_slice());
        assert_eq!(doc.next_element_sibling(items[0]), Some(items[1]));
        assert_eq!(doc.next_element_sibling(items[2]), None);
        assert_eq!(doc.previous_element_sibling(items[1]), Some(items[0]));
        assert_eq!(doc.previous_element_sibling(items[0]), None);
    }

    #[test]
    fn append_rejects_cycles() {
        let (mut doc, list, items) = list_doc();
        assert_eq!(
            doc.append_child(items[0], list),
            Err(DomError::Cycle {
                parent: items[0],
                child: list
            })
        );
    }

    #[test]
    fn append_moves_existing_child() {
        let (mut doc, list, items) = list_doc();
        doc.append_child(list, items[0]).unwrap();
        assert_eq!(doc.children(list), &[items[1], items[2], items[0]]);
    }

    #[test]
    fn remove_detaches_but_keeps_node() {
        let (mut doc, list, items) = list_doc();
        doc.remove(items[1]).unwrap();
        assert_eq!(doc.children(list), &[items[0], items[2]]);
        assert!(!doc.is_connected(items[1]));
        assert_eq!(doc.text_content(items[1]), "item 1");
    }

    #[test]
    fn deep_clone_copies_subtree() {
        let mut doc = Document::new();
        let a = doc.create_child(doc.root(), "a", &[("class", "item")]).unwrap();
        let img = doc
            .create_child(a, "img", &[("data-element", "flag")])
            .unwrap();
        let label = doc
            .create_child(a, "div", &[("data-element", "value")])
            .unwrap();
        doc.set_text_content(label, "XX").unwrap();

        let copy = doc.clone_node(a, true).unwrap();
        assert_ne!(copy, a);
        assert!(!doc.is_connected(copy));
        assert_eq!(doc.children(copy).len(), 2);
        assert_eq!(doc.text_content(copy), "XX");
        let copied_img = doc
            .query_selector(copy, &Selector::attr_eq("data-element", "flag"))
            .unwrap();
        assert_ne!(copied_img, img);
    }

    #[test]
    fn shallow_clone_has_no_children() {
        let (mut doc, list, _) = list_doc();
        let copy = doc.clone_node(list, false).unwrap();
        assert!(doc.children(copy).is_empty());
        assert_eq!(doc.get_attribute(copy, "id"), Some("list"));
    }

    #[test]
    fn get_element_by_id_ignores_detached() {
        let (mut doc, list, _) = list_doc();
        assert_eq!(doc.get_element_by_id("list"), Some(list));
        doc.remove(list).unwrap();
        assert_eq!(doc.get_element_by_id("list"), None);
    }

    #[test]
    fn query_in_document_order() {
        let (doc, list, items) = list_doc();
        assert_eq!(doc.query_selector(list, &Selector::class("item")), Some(items[0]));
        assert_eq!(doc.query_selector_all(list, &Selector::class("item")), items);
    }

    #[test]
    fn class_helpers() {
        let (mut doc, list, _) = list_doc();
        doc.add_class(list, "w--open").unwrap();
        assert!(doc.has_class(list, "w--open"));
        assert!(!doc.toggle_class(list, "w--open").unwrap());
        assert!(!doc.has_class(list, "w--open"));
        assert!(doc.toggle_class(list, "w--open").unwrap());
        doc.remove_class(list, "w--open").unwrap();
        assert_eq!(doc.get_attribute(list, "class"), Some(""));
    }

    #[test]
    fn set_text_replaces_children() {
        let (mut doc, list, items) = list_doc();
        doc.set_text_content(list, "empty").unwrap();
        assert!(doc.children(list).is_empty());
        assert_eq!(doc.parent(items[0]), None);
        assert_eq!(doc.text_content(list), "empty");
    }

    #[test]
    fn focus_and_blur() {
        let (mut doc, _, items) = list_doc();
        doc.focus(items[1]).unwrap();
        assert_eq!(doc.active_element(), Some(items[1]));
        doc.blur(items[0]);
        assert_eq!(doc.active_element(), Some(items[1]));
        doc.blur(items[1]);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn detached_nodes_cannot_focus() {
        let (mut doc, _, items) = list_doc();
        doc.remove(items[0]).unwrap();
        doc.focus(items[0]).unwrap();
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn removing_focused_subtree_clears_focus() {
        let (mut doc, list, items) = list_doc();
        doc.focus(items[2]).unwrap();
        doc.remove(list).unwrap();
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn scroll_is_recorded() {
        let (mut doc, _, items) = list_doc();
        let opts = ScrollIntoViewOptions {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        };
        doc.scroll_into_view(items[2], opts).unwrap();
        assert_eq!(doc.last_scroll(), Some((items[2], opts)));
    }

    #[test]
    fn observer_records_attribute_changes_on_target_only() {
        let (mut doc, list, items) = list_doc();
        let obs = doc.observe(list, MutationObserverInit::attributes());
        doc.set_attribute(items[0], "aria-selected", "true").unwrap();
        assert!(!doc.has_records(obs));

        doc.add_class(list, "w--open").unwrap();
        doc.set_attribute(list, "aria-hidden", "false").unwrap();
        let records = doc.take_records(obs);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attribute_name, "class");
        assert_eq!(records[1].attribute_name, "aria-hidden");
        assert!(doc.take_records(obs).is_empty());
    }

    #[test]
    fn observer_filter_and_old_value() {
        let (mut doc, list, _) = list_doc();
        let obs = doc.observe(
            list,
            MutationObserverInit {
                attributes: true,
                attribute_old_value: true,
                attribute_filter: Some(vec!["class".into()]),
            },
        );
        doc.set_attribute(list, "aria-hidden", "true").unwrap();
        doc.add_class(list, "w--open").unwrap();
        doc.remove_class(list, "w--open").unwrap();
        let records = doc.take_records(obs);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].old_value, None);
        assert_eq!(records[1].old_value.as_deref(), Some("w--open"));
    }

    #[test]
    fn unchanged_class_list_records_nothing() {
        let (mut doc, list, _) = list_doc();
        let obs = doc.observe(list, MutationObserverInit::attributes());
        doc.remove_class(list, "w--open").unwrap();
        assert!(!doc.has_records(obs));
    }

    #[test]
    fn disconnect_stops_recording() {
        let (mut doc, list, _) = list_doc();
        let obs = doc.observe(list, MutationObserverInit::attributes());
        doc.add_class(list, "a").unwrap();
        doc.disconnect(obs);
        doc.add_class(list, "b").unwrap();
        assert!(doc.take_records(obs).is_empty());
    }

    #[test]
    fn unknown_node_errors() {
        let mut doc = Document::new();
        let bogus = NodeId(99);
        assert_eq!(
            doc.set_attribute(bogus, "id", "x"),
            Err(DomError::UnknownNode(bogus))
        );
        assert_eq!(doc.get_attribute(bogus, "id"), None);
        assert!(doc.children(bogus).is_empty());
    }
}
