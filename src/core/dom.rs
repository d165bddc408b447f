// src/core/dom.rs
//
// Small, forgiving HTML tree for the archive's game pages.
// Handles what those pages actually contain: unclosed <td>/<tr>/<p>, void
// elements, comments, raw <script>/<style>, quoted attributes with '>' inside.
// It is not a conforming HTML5 parser and does not try to be.

use super::sanitize::{decode_entities, normalize_ws};

pub type NodeId = usize;

#[derive(Clone, Debug)]
enum NodeKind {
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Parsed page. Node 0 is a synthetic `#root` element.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];
const RAW_TEXT: &[&str] = &["script", "style"];

impl Document {
    pub fn parse(html: &str) -> Self {
        let mut b = Builder::new();
        b.run(html);
        Document { nodes: b.nodes }
    }

    pub fn root(&self) -> Element<'_> {
        Element { doc: self, id: 0 }
    }

    /// Number of element nodes below the root.
    pub fn element_count(&self) -> usize {
        self.nodes
            .iter()
            .skip(1)
            .filter(|n| matches!(n.kind, NodeKind::Element { .. }))
            .count()
    }

    /// First element carrying `id="<id>"`, in document order.
    pub fn by_id(&self, id: &str) -> Option<Element<'_>> {
        self.root().descendants().find(|e| e.attr("id") == Some(id))
    }
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.tag())?;
        if let Some(id) = self.attr("id") { write!(f, " id={id}")?; }
        if let Some(c) = self.attr("class") { write!(f, " class={c}")?; }
        write!(f, ">")
    }
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        &self.doc.nodes[self.id]
    }

    pub fn tag(&self) -> &'a str {
        match &self.node().kind {
            NodeKind::Element { tag, .. } => tag,
            NodeKind::Text(_) => "",
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_ascii_whitespace().any(|x| x.eq_ignore_ascii_case(class)))
            .unwrap_or(false)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.node().parent.map(|id| Element { doc: self.doc, id })
    }

    /// Child elements (text nodes skipped).
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .copied()
            .filter(move |&c| matches!(doc.nodes[c].kind, NodeKind::Element { .. }))
            .map(move |id| Element { doc, id })
    }

    /// Child elements with the given tag.
    pub fn children_tagged(&self, tag: &'a str) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.children().filter(move |e| e.is(tag))
    }

    /// All descendant elements, pre-order (document order), excluding self.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.node().children.clone();
        stack.reverse();
        Descendants { doc: self.doc, stack }
    }

    /// First descendant `<tag class="class">`.
    pub fn find_class(&self, tag: &str, class: &str) -> Option<Element<'a>> {
        self.descendants().find(|e| e.is(tag) && e.has_class(class))
    }

    /// Every descendant `<tag class="class">`, in document order.
    pub fn find_all_class(&self, tag: &'a str, class: &'a str) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.descendants().filter(move |e| e.is(tag) && e.has_class(class))
    }

    pub fn find_tag(&self, tag: &str) -> Option<Element<'a>> {
        self.descendants().find(|e| e.is(tag))
    }

    /// Table rows that belong to this table, looking through `thead`/`tbody`/`tfoot`
    /// but not into nested tables.
    pub fn rows(&self) -> Vec<Element<'a>> {
        let mut out = Vec::new();
        for child in self.children() {
            if child.is("tr") {
                out.push(child);
            } else if child.is("tbody") || child.is("thead") || child.is("tfoot") {
                out.extend(child.children_tagged("tr"));
            }
        }
        out
    }

    /// Concatenated descendant text, whitespace-normalized.
    pub fn text(&self) -> String {
        let mut raw = s!();
        self.collect_text(self.id, &mut raw);
        normalize_ws(&raw)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = &self.doc.nodes[id];
        match &node.kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { tag, .. } => {
                if tag == "br" { out.push(' '); }
                for &c in &node.children {
                    self.collect_text(c, out);
                }
                // Block-ish cells shouldn't fuse with their neighbours.
                if matches!(tag.as_str(), "td" | "th" | "p" | "div" | "li") { out.push(' '); }
            }
        }
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Element<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.doc.nodes[id];
            if let NodeKind::Element { .. } = node.kind {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(Element { doc: self.doc, id });
            }
        }
        None
    }
}

/* ---------------- Tree builder ---------------- */

struct Builder {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
}

impl Builder {
    fn new() -> Self {
        let root = Node {
            kind: NodeKind::Element { tag: s!("#root"), attrs: Vec::new() },
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root], open: vec![0] }
    }

    fn current(&self) -> NodeId {
        *self.open.last().unwrap_or(&0)
    }

    fn tag_of(&self, id: NodeId) -> &str {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => tag,
            NodeKind::Text(_) => "",
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.current();
        let id = self.nodes.len();
        self.nodes.push(Node { kind, parent: Some(parent), children: Vec::new() });
        self.nodes[parent].children.push(id);
        id
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() { return; }
        let text = decode_entities(raw);
        self.push_node(NodeKind::Text(text));
    }

    /// Pop open elements until one tagged `tag` has been closed, but never past
    /// any tag in `barrier`. Returns whether anything was closed.
    fn close_until(&mut self, tag: &str, barrier: &[&str]) -> bool {
        let mut depth = None;
        for (i, &id) in self.open.iter().enumerate().rev() {
            let t = self.tag_of(id);
            if t == tag { depth = Some(i); break; }
            if barrier.contains(&t) || id == 0 { break; }
        }
        match depth {
            Some(i) if i > 0 => { self.open.truncate(i); true }
            _ => false,
        }
    }

    /// Implicit end tags the archive relies on.
    fn implicit_close(&mut self, tag: &str) {
        match tag {
            "td" | "th" => {
                self.close_until("td", &["tr", "table"]);
                self.close_until("th", &["tr", "table"]);
            }
            "tr" => {
                self.close_until("tr", &["table"]);
            }
            "tbody" | "thead" | "tfoot" => {
                self.close_until("tbody", &["table"]);
                self.close_until("thead", &["table"]);
            }
            "p" | "table" | "div" | "h1" | "h2" | "h3" => {
                self.close_until("p", &["td", "th", "div", "table"]);
            }
            "li" => {
                self.close_until("li", &["ul", "ol"]);
            }
            _ => {}
        }
    }

    fn run(&mut self, html: &str) {
        let b = html.as_bytes();
        let n = b.len();
        let mut i = 0usize;
        let mut text_start = 0usize;

        while i < n {
            if b[i] != b'<' { i += 1; continue; }

            let next = b.get(i + 1).copied().unwrap_or(b' ');
            let is_markup = next.is_ascii_alphabetic() || next == b'/' || next == b'!' || next == b'?';
            if !is_markup { i += 1; continue; }

            self.push_text(&html[text_start..i]);

            if html[i..].starts_with("<!--") {
                i = html[i + 4..].find("-->").map(|e| i + 4 + e + 3).unwrap_or(n);
            } else if next == b'!' || next == b'?' {
                i = html[i..].find('>').map(|e| i + e + 1).unwrap_or(n);
            } else {
                let end = tag_end(b, i);
                let inner_end = if b[end - 1] == b'>' { end - 1 } else { end };
                let inner = &html[i + 1..inner_end.max(i + 1)];
                i = end;
                if let Some(name) = inner.strip_prefix('/') {
                    let name = name.trim().to_ascii_lowercase();
                    self.close_until(&name, &[]);
                } else {
                    let self_closing = inner.ends_with('/');
                    let inner = inner.trim_end_matches('/');
                    let (tag, attrs) = parse_open_tag(inner);
                    self.implicit_close(&tag);
                    let is_void = VOID.contains(&tag.as_str());
                    let raw = RAW_TEXT.contains(&tag.as_str());
                    let id = self.push_node(NodeKind::Element { tag: tag.clone(), attrs });
                    if raw && !self_closing {
                        // Keep raw content as an opaque text child; skip to its end tag.
                        let close = format!("</{tag}");
                        let rest_lc = html[i..].to_ascii_lowercase();
                        let stop = rest_lc.find(&close).map(|e| i + e).unwrap_or(n);
                        self.nodes.push(Node {
                            kind: NodeKind::Text(html[i..stop].to_string()),
                            parent: Some(id),
                            children: Vec::new(),
                        });
                        let tid = self.nodes.len() - 1;
                        self.nodes[id].children.push(tid);
                        i = html[stop..].find('>').map(|e| stop + e + 1).unwrap_or(n);
                    } else if !is_void && !self_closing {
                        self.open.push(id);
                    }
                }
            }
            text_start = i;
        }
        if text_start < n {
            self.push_text(&html[text_start..]);
        }
    }
}

/// Byte index just past the `>` that ends the tag starting at `start`,
/// ignoring any `>` inside quoted attribute values.
fn tag_end(b: &[u8], start: usize) -> usize {
    let n = b.len();
    let mut i = start + 1;
    let mut in_s = false; // '
    let mut in_d = false; // "
    while i < n {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return i + 1,
            _ => {}
        }
        i += 1;
    }
    n
}

/// `td class="clue" id=x` → ("td", [("class","clue"), ("id","x")])
fn parse_open_tag(inner: &str) -> (String, Vec<(String, String)>) {
    let inner = inner.trim();
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    let tag = inner[..name_end].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let rest: Vec<char> = inner[name_end..].chars().collect();
    let mut i = 0usize;
    while i < rest.len() {
        while i < rest.len() && rest[i].is_whitespace() { i += 1; }
        let ks = i;
        while i < rest.len() && !rest[i].is_whitespace() && rest[i] != '=' { i += 1; }
        if ks == i { i += 1; continue; }
        let key: String = rest[ks..i].iter().collect::<String>().to_ascii_lowercase();
        while i < rest.len() && rest[i].is_whitespace() { i += 1; }

        let mut value = s!();
        if i < rest.len() && rest[i] == '=' {
            i += 1;
            while i < rest.len() && rest[i].is_whitespace() { i += 1; }
            if i < rest.len() && (rest[i] == '"' || rest[i] == '\'') {
                let q = rest[i];
                i += 1;
                let vs = i;
                while i < rest.len() && rest[i] != q { i += 1; }
                value = rest[vs..i].iter().collect();
                i += 1;
            } else {
                let vs = i;
                while i < rest.len() && !rest[i].is_whitespace() { i += 1; }
                value = rest[vs..i].iter().collect();
            }
        }
        attrs.push((key, decode_entities(&value)));
    }
    (tag, attrs)
}
