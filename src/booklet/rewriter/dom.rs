//! 页面DOM
//!
//! 使用 `scraper` 解析单个页面片段，直接在其 `ego_tree` 树上修改节点，
//! 再交给 html5ever 的序列化器输出。属性保持源文档中的顺序。

use html5ever::{LocalName, Namespace, QualName};
use once_cell::sync::Lazy;
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector, StrTendril};

use crate::booklet::contents::PAGE_CLASS;

pub use ego_tree::NodeId;

/// 页面容器选择器
pub static PAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!(".{}", PAGE_CLASS)).expect("valid page selector"));

/// 解析时会吞掉开头换行的元素
static LEADING_NEWLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("pre, textarea, listing").expect("valid newline selector"));

/// 单个页面的可编辑DOM
pub struct PageDom {
    html: Html,
}

impl PageDom {
    /// 解析HTML片段
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    /// 解析完整的HTML文档
    pub fn parse_document(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// 底层的只读文档
    pub fn document(&self) -> &Html {
        &self.html
    }

    /// 按文档顺序返回匹配选择器的元素ID（已删除的元素不会出现）
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .map(|element| element.id())
            .collect()
    }

    /// 第一个匹配选择器的元素
    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    /// 页面容器元素
    pub fn page_root(&self) -> Option<NodeId> {
        self.select_first(&PAGE_SELECTOR)
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// 元素的标签名
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.value().name())
    }

    /// 读取属性（无命名空间）
    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)
            .and_then(|element| element.value().attr(name))
            .map(|value| value.to_string())
    }

    /// 设置属性，已有的属性保持原位置，新属性追加在末尾
    ///
    /// 元素缓存的 `id` 不会随之更新，依赖新ID的选择需要重新解析。
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        if let Node::Element(element) = node.value() {
            let key = QualName::new(None, Namespace::from(""), LocalName::from(name));
            element.attrs.insert(key, StrTendril::from(value.into()));
        }
    }

    /// 删除元素及其子树
    pub fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// 在元素的最前面插入一段HTML，返回插入的顶层节点
    ///
    /// 多次插入时，后插入的内容位于最前。
    pub fn prepend_html(&mut self, id: NodeId, markup: &str) -> Vec<NodeId> {
        let inserted = self.adopt_fragment(markup);
        if let Some(mut parent) = self.html.tree.get_mut(id) {
            for child in inserted.iter().rev() {
                parent.prepend_id(*child);
            }
        }
        inserted
    }

    /// 在元素的末尾追加一段HTML，返回插入的顶层节点
    pub fn append_html(&mut self, id: NodeId, markup: &str) -> Vec<NodeId> {
        let inserted = self.adopt_fragment(markup);
        if let Some(mut parent) = self.html.tree.get_mut(id) {
            for child in &inserted {
                parent.append_id(*child);
            }
        }
        inserted
    }

    /// 在元素的末尾追加文本，序列化时自动转义
    pub fn append_text(&mut self, id: NodeId, text: &str) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.append(Node::Text(Text {
                text: StrTendril::from(text),
            }));
        }
    }

    /// 将片段解析后并入当前树（暂不挂接），返回片段的顶层节点
    fn adopt_fragment(&mut self, markup: &str) -> Vec<NodeId> {
        let fragment = Html::parse_fragment(markup);
        let fragment_root = self.html.tree.extend_tree(fragment.tree).id();
        self.html
            .tree
            .get(fragment_root)
            .and_then(|root| root.children().find(|child| child.value().is_element()))
            .map(|wrapper| wrapper.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// 序列化整个片段
    pub fn to_html(&self) -> String {
        self.serializable().root_element().inner_html()
    }

    /// 序列化单个元素（包含元素本身）
    pub fn outer_html(&self, id: NodeId) -> Option<String> {
        let html = self.serializable();
        let element = html.tree.get(id).and_then(ElementRef::wrap)?;
        let attached = element
            .ancestors()
            .any(|ancestor| ancestor.id() == html.tree.root().id());
        attached.then(|| element.html())
    }

    /// 补回解析器在 `pre` 等元素开头吞掉的换行
    fn serializable(&self) -> Html {
        let mut html = self.html.clone();
        let text_nodes: Vec<NodeId> = self
            .select(&LEADING_NEWLINE_SELECTOR)
            .into_iter()
            .filter_map(|id| html.tree.get(id)?.first_child())
            .filter(|child| {
                child
                    .value()
                    .as_text()
                    .is_some_and(|text| text.starts_with('\n'))
            })
            .map(|child| child.id())
            .collect();

        for id in text_nodes {
            if let Some(mut node) = html.tree.get_mut(id) {
                if let Node::Text(text) = node.value() {
                    text.text = StrTendril::from(format!("\n{}", &*text.text));
                }
            }
        }
        html
    }
}

/// 生成只包含文本的单个元素
pub fn element_with_text(tag: &str, text: &str) -> String {
    let mut dom = PageDom::parse(&format!("<{tag}></{tag}>"));
    let element = dom
        .html
        .root_element()
        .child_elements()
        .next()
        .map(|element| element.id());
    if let Some(id) = element {
        dom.append_text(id, text);
    }
    dom.to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_serialize_without_edits() {
        let markup = r#"<div class="booklet-page"><p>A &amp; B <br>&lt;tag&gt;</p><!-- note --></div>"#;
        let dom = PageDom::parse(markup);
        assert_eq!(dom.to_html(), markup);
    }

    #[test]
    fn test_serialize_keeps_source_details() {
        let markup = concat!(
            r#"<div data-path="/other" class="booklet-page"><p title="t" class="c">Hi</p>"#,
            "<pre>\n\nline</pre>",
            r##"<svg><use xlink:href="#icon"></use></svg>"##,
            "<script>if (a < b && c) {}</script></div>"
        );
        let dom = PageDom::parse(markup);
        assert_eq!(dom.to_html(), markup);
        let root = dom.page_root().unwrap();
        assert_eq!(dom.outer_html(root).as_deref(), Some(markup));
    }

    #[test]
    fn test_remove_and_select() {
        let mut dom = PageDom::parse(r#"<div><ul><li class="x">1</li><li>2</li></ul></div>"#);
        let list = dom.select_first(&selector("ul")).unwrap();
        dom.remove(list);
        assert!(dom.select(&selector("li")).is_empty());
        assert_eq!(dom.to_html(), "<div></div>");
        assert!(dom.outer_html(list).is_none());
    }

    #[test]
    fn test_set_attr_and_prepend() {
        let mut dom = PageDom::parse(r#"<div class="booklet-page"><h1 id="t">Title</h1></div>"#);
        let root = dom.page_root().unwrap();
        let heading = dom.select_first(&selector("h1")).unwrap();
        dom.set_attr(heading, "id", "page--t");
        dom.set_attr(root, "id", "page");
        dom.prepend_html(heading, "<span>1.</span>");
        dom.prepend_html(heading, "<b>x</b>");

        assert_eq!(dom.attr(heading, "id").as_deref(), Some("page--t"));
        assert_eq!(dom.tag_name(heading), Some("h1"));
        assert_eq!(
            dom.to_html(),
            r#"<div class="booklet-page" id="page"><h1 id="page--t"><b>x</b><span>1.</span>Title</h1></div>"#
        );
        assert_eq!(
            dom.outer_html(heading).as_deref(),
            Some(r#"<h1 id="page--t"><b>x</b><span>1.</span>Title</h1>"#)
        );
    }

    #[test]
    fn test_inserted_nodes_are_selectable() {
        let mut dom = PageDom::parse(r#"<div class="booklet-page"><p>body</p></div>"#);
        let root = dom.page_root().unwrap();
        let inserted = dom.prepend_html(root, r#"<div class="title"></div>"#);
        dom.append_text(inserted[0], "A < B & C");
        dom.append_html(root, "<footer>end</footer>");

        assert_eq!(dom.select(&selector(".title")), inserted);
        assert_eq!(
            dom.to_html(),
            r#"<div class="booklet-page"><div class="title">A &lt; B &amp; C</div><p>body</p><footer>end</footer></div>"#
        );
    }

    #[test]
    fn test_element_with_text() {
        assert_eq!(element_with_text("title", "Docs & <More>"), "<title>Docs &amp; &lt;More&gt;</title>");
    }
}
