//! Tree building and mutation through the document API.

use pretty_assertions::assert_eq;

use flxml::{Document, NodeKind, ParseFlags, PrintFlags, DOCUMENT_NODE};

#[test]
fn build_document_from_scratch() {
    let mut doc = Document::new();
    let root = doc.allocate_element("catalog");
    doc.append_child(DOCUMENT_NODE, root);

    let item = doc.allocate_element("item");
    let id = doc.allocate_attribute("id", "7");
    doc.append_attribute(item, id);
    let text = doc.allocate_data("socks");
    doc.append_child(item, text);
    doc.append_child(root, item);

    assert_eq!(
        doc.to_xml(PrintFlags::empty()),
        "<catalog>\n\t<item id=\"7\">socks</item>\n</catalog>\n"
    );
}

#[test]
fn remove_and_relink_child() {
    let mut doc = Document::parse("<r><a/><b/><c/></r>", ParseFlags::DEFAULT).unwrap();
    let r = doc.root_element().unwrap();
    let b = doc.first_child_named(r, "b").unwrap();

    doc.remove_node(b);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<r><a/><c/></r>");

    // An unlinked node can be linked somewhere else.
    let c = doc.first_child_named(r, "c").unwrap();
    doc.insert_child(r, c, b);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<r><a/><b/><c/></r>");
}

#[test]
fn reorder_with_prepend() {
    let mut doc = Document::parse("<r><a/></r>", ParseFlags::DEFAULT).unwrap();
    let r = doc.root_element().unwrap();
    let z = doc.allocate_element("z");
    doc.prepend_child(r, z);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<r><z/><a/></r>");
}

#[test]
fn rename_and_set_values() {
    let mut doc = Document::parse("<old attr=\"1\">text</old>", ParseFlags::DEFAULT).unwrap();
    let root = doc.root_element().unwrap();
    doc.set_name(root, "new");
    let attr = doc.first_attribute(root).unwrap();
    doc.set_attr_name(attr, "renamed");
    doc.set_attr_value(attr, "2");
    assert_eq!(
        doc.to_xml(PrintFlags::NO_INDENTING),
        "<new renamed=\"2\">text</new>"
    );
}

#[test]
fn attribute_removal_and_insertion() {
    let mut doc = Document::parse("<e a=\"1\" b=\"2\" c=\"3\"/>", ParseFlags::DEFAULT).unwrap();
    let e = doc.root_element().unwrap();
    let b = doc.attribute_named(e, "b").unwrap();
    doc.remove_attribute(b);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<e a=\"1\" c=\"3\"/>");

    let c = doc.attribute_named(e, "c").unwrap();
    doc.insert_attribute(e, c, b);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<e a=\"1\" b=\"2\" c=\"3\"/>");
}

#[test]
fn clone_subtree_within_document() {
    let mut doc = Document::parse("<r><item n=\"1\">x</item></r>", ParseFlags::DEFAULT).unwrap();
    let r = doc.root_element().unwrap();
    let item = doc.first_child(r).unwrap();
    let copy = doc.clone_node(item);
    doc.append_child(r, copy);
    assert_eq!(
        doc.to_xml(PrintFlags::NO_INDENTING),
        "<r><item n=\"1\">x</item><item n=\"1\">x</item></r>"
    );
}

#[test]
fn import_subtree_from_another_document() {
    let src = Document::parse("<lib><book title=\"Dune\"/></lib>", ParseFlags::DEFAULT).unwrap();
    let book = src.first_child(src.root_element().unwrap()).unwrap();

    let mut dst = Document::parse("<shelf/>", ParseFlags::DEFAULT).unwrap();
    let shelf = dst.root_element().unwrap();
    let imported = dst.import_node(&src, book);
    dst.append_child(shelf, imported);

    drop(src);
    assert_eq!(
        dst.to_xml(PrintFlags::NO_INDENTING),
        "<shelf><book title=\"Dune\"/></shelf>"
    );
}

#[test]
fn reset_clears_everything() {
    let mut doc = Document::parse("<r><a/><b/></r>", ParseFlags::DEFAULT).unwrap();
    doc.reset();
    assert_eq!(doc.node_count(), 1);
    assert_eq!(doc.node(doc.root()).kind, NodeKind::Document);
    assert_eq!(doc.to_xml(PrintFlags::empty()), "");

    let fresh = doc.allocate_element("fresh");
    doc.append_child(DOCUMENT_NODE, fresh);
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<fresh/>");
}

#[test]
fn allocated_text_is_escaped_on_print() {
    let mut doc = Document::new();
    let e = doc.allocate_element("e");
    doc.append_child(DOCUMENT_NODE, e);
    let a = doc.allocate_attribute("cond", "a < b & c");
    doc.append_attribute(e, a);
    let t = doc.allocate_data("1 < 2");
    doc.append_child(e, t);
    assert_eq!(
        doc.to_xml(PrintFlags::NO_INDENTING),
        "<e cond=\"a &lt; b &amp; c\">1 &lt; 2</e>"
    );
}

#[test]
#[should_panic(expected = "already linked")]
fn double_link_panics() {
    let mut doc = Document::parse("<r><a/></r>", ParseFlags::DEFAULT).unwrap();
    let r = doc.root_element().unwrap();
    let a = doc.first_child(r).unwrap();
    doc.append_child(r, a);
}
