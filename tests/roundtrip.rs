//! Parse/print round trips over realistic documents.

use pretty_assertions::assert_eq;

use flxml::{Document, ParseFlags, PrintFlags};

fn roundtrip(input: &str, flags: ParseFlags) -> String {
    let doc = Document::parse(input, flags).unwrap();
    doc.to_xml(PrintFlags::empty())
}

#[test]
fn simple_element_roundtrips() {
    assert_eq!(roundtrip("<fish>cakes</fish>", ParseFlags::DEFAULT), "<fish>cakes</fish>\n");
}

#[test]
fn empty_element_roundtrips() {
    assert_eq!(roundtrip("<fish/>", ParseFlags::DEFAULT), "<fish/>\n");
}

#[test]
fn attribute_quote_roundtrips() {
    assert_eq!(
        roundtrip("<simple arg=\"'\"/>", ParseFlags::DEFAULT),
        "<simple arg=\"'\"/>\n"
    );
}

#[test]
fn document_with_everything() {
    let input = concat!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
        "<!DOCTYPE catalog>\n",
        "<catalog>\n",
        "  <!-- stock as of last sync -->\n",
        "  <item id=\"1\" price=\"3.50\">Tea &amp; biscuits</item>\n",
        "  <item id=\"2\"/>\n",
        "  <?audit checked?>\n",
        "  <raw><![CDATA[a < b]]></raw>\n",
        "</catalog>\n",
    );
    let doc = Document::parse(input, ParseFlags::FULL).unwrap();
    assert_eq!(
        doc.to_xml(PrintFlags::empty()),
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<!DOCTYPE catalog>\n",
            "<catalog>\n",
            "\t<!-- stock as of last sync -->\n",
            "\t<item id=\"1\" price=\"3.50\">Tea &amp; biscuits</item>\n",
            "\t<item id=\"2\"/>\n",
            "\t<?audit checked?>\n",
            "\t<raw>\n",
            "\t\t<![CDATA[a < b]]>\n",
            "\t</raw>\n",
            "</catalog>\n",
        )
    );
}

#[test]
fn print_is_idempotent() {
    let input = "<?xml version=\"1.0\"?><a one=\"1\" two=\"2\"><b>text</b><c/><d>more</d></a>";
    let once = roundtrip(input, ParseFlags::FULL);
    let twice = roundtrip(&once, ParseFlags::FULL);
    assert_eq!(once, twice);
}

#[test]
fn entities_decode_and_reescape() {
    // Decoded on parse, re-escaped on print. Numeric references come back
    // as literal characters.
    let doc = Document::parse("<m>&lt;tag&gt; &#38; &#x26;</m>", ParseFlags::DEFAULT).unwrap();
    assert_eq!(doc.value(doc.root_element().unwrap()), "<tag> & &");
    assert_eq!(doc.to_xml(PrintFlags::empty()), "<m>&lt;tag&gt; &amp; &amp;</m>\n");
}

#[test]
fn no_indenting_is_compact() {
    let doc = Document::parse("<a><b>x</b><c/></a>", ParseFlags::DEFAULT).unwrap();
    assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<a><b>x</b><c/></a>");
}

#[test]
fn owned_parse_avoids_copy_semantics() {
    let doc = Document::parse_owned("<a>x</a>".to_string(), ParseFlags::DEFAULT).unwrap();
    assert_eq!(doc.value(doc.root_element().unwrap()), "x");
}

#[test]
fn utf8_content_survives() {
    let input = "<greeting lang=\"ja\">こんにちは 😀</greeting>";
    let doc = Document::parse(input, ParseFlags::DEFAULT).unwrap();
    let g = doc.root_element().unwrap();
    assert_eq!(doc.value(g), "こんにちは 😀");
    assert_eq!(doc.to_xml(PrintFlags::empty()), format!("{input}\n"));
}
