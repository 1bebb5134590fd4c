//! Parse/print tests over whole documents.

use pretty_assertions::assert_eq;
use vue_sfc::{parse, AttributeValue, BlockKind};

const INDENTED: &str = r#"
    <template>
      <p>{{ msg }}</p>
    </template>

    <script lang="ts">
    export default {
      data () {
        return { msg: 'Hello' }
      }
    }
    </script>

    <style scoped>
    p {
      color: red;
    }
    </style>

    <style module="test">
    .foo {
      color: blue;
    }
    </style>
    "#;

#[test]
fn parses_indented_component() {
    let doc = parse(INDENTED).unwrap();

    assert_eq!(doc.template.as_ref().unwrap().content.trim(), "<p>{{ msg }}</p>");

    let script = doc.script.as_ref().unwrap();
    assert_eq!(script.lang(), Some("ts"));
    assert_eq!(
        script.content.trim(),
        "export default {\n  data () {\n    return { msg: 'Hello' }\n  }\n}"
    );

    let styles: Vec<_> = doc.styles().collect();
    assert_eq!(styles.len(), 2);
    assert_eq!(styles[0].attr("scoped"), Some(&AttributeValue::Bool(true)));
    assert_eq!(styles[0].content.trim(), "p {\n  color: red;\n}");
    assert_eq!(styles[1].attr_text("module"), Some("test"));
    assert_eq!(styles[1].content.trim(), ".foo {\n  color: blue;\n}");
}

#[test]
fn prints_canonical_source() {
    let doc = parse(
        r#"
    <template>
      <p>{{ msg }}</p>
    </template>

    <script lang="ts">
    export default {}
    </script>

    <style scoped>
    p {
      color: red;
    }
    </style>

    <custom src="/path/to/foo" foo="test" bar baz="">
    foo
    </custom>
    "#,
    )
    .unwrap();

    insta::assert_snapshot!(doc.serialize(), @r#"
    <template>
    <p>{{ msg }}</p>
    </template>
    <script lang="ts">
    export default {}
    </script>
    <style scoped>
    p {
      color: red;
    }
    </style>
    <custom src="/path/to/foo" foo="test" bar baz>
    foo
    </custom>
    "#);
}

#[test]
fn canonical_documents_round_trip() {
    let canonical = [
        "",
        "<template>\n<div></div>\n</template>",
        "<script lang=\"ts\">\nexport default {}\n</script>\n<style scoped>\n</style>",
        "<template><p/></template>\n<script>x</script>\n<docs a=\"1\" b>d</docs>\n<style>s</style>\n<i18n>{}</i18n>",
    ];

    for source in canonical {
        let doc = parse(source).unwrap();
        assert_eq!(doc.serialize(), source);
    }
}

#[test]
fn keeps_style_and_custom_interleaving() {
    let source = "<docs>a</docs>\n<style>b</style>\n<i18n>c</i18n>\n<style>d</style>";
    let doc = parse(source).unwrap();

    let kinds: Vec<_> = doc.blocks.iter().map(|b| b.kind.tag().to_string()).collect();
    assert_eq!(kinds, ["docs", "style", "i18n", "style"]);
    assert_eq!(doc.custom_blocks().count(), 2);
    assert_eq!(doc.serialize(), source);
}

#[test]
fn moves_template_and_script_first() {
    let doc = parse("<style>s</style>\n<script>x</script>\n<template>t</template>").unwrap();
    assert_eq!(
        doc.serialize(),
        "<template>t</template>\n<script>x</script>\n<style>s</style>"
    );
    assert!(matches!(doc.blocks[0].kind, BlockKind::Style));
}
