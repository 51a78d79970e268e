//! tests/xml_tests.rs
//! Conversão XML -> objeto solto.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::services::xml_service::{find_first, parse_xml};
    use crate::tests::{resposta_truncada, RESPOSTA_MNI};

    #[test]
    fn text_elements_become_strings() {
        let parsed = parse_xml("<a><b>1</b><c></c><d/></a>");
        assert!(parsed.is_complete());
        assert_eq!(parsed.value, json!({"a": {"b": "1", "c": "", "d": ""}}));
    }

    #[test]
    fn attributes_get_prefix_and_namespaces_are_dropped() {
        let parsed = parse_xml(
            r#"<ns:a xmlns:ns="urn:x" ns:id="7"><ns:b tipo="x">texto</ns:b></ns:a>"#,
        );
        assert!(parsed.is_complete());
        assert_eq!(
            parsed.value,
            json!({"a": {"@id": "7", "b": {"@tipo": "x", "#text": "texto"}}})
        );
    }

    #[test]
    fn repeated_children_become_arrays() {
        let parsed = parse_xml("<a><i>1</i><j>x</j><i>2</i><i>3</i></a>");
        assert_eq!(parsed.value, json!({"a": {"i": ["1", "2", "3"], "j": "x"}}));
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let parsed = parse_xml(r#"<a t="x &amp; y"><b>1 &lt; 2</b><c><![CDATA[<raw>]]></c></a>"#);
        assert!(parsed.is_complete());
        assert_eq!(
            parsed.value,
            json!({"a": {"@t": "x & y", "b": "1 < 2", "c": "<raw>"}})
        );
    }

    #[test]
    fn mismatched_tag_returns_partial_tree() {
        let parsed = parse_xml("<a><b>ok</b><c>1</a>");
        assert!(parsed.error.is_some());
        let a = parsed.value.get("a").expect("raiz parcial");
        assert_eq!(a.get("b"), Some(&json!("ok")));
    }

    #[test]
    fn truncated_document_keeps_what_was_read() {
        let parsed = parse_xml(resposta_truncada());
        assert!(!parsed.is_complete());
        let processo = find_first(&parsed.value, "processo").expect("processo parcial");
        assert!(processo.get("dadosBasicos").is_some());
        assert!(processo.get("documento").is_none());
    }

    #[test]
    fn empty_input_is_empty_object() {
        let parsed = parse_xml("");
        assert!(parsed.is_complete());
        assert_eq!(parsed.value, json!({}));
    }

    #[test]
    fn find_first_searches_nested_arrays() {
        let parsed = parse_xml(RESPOSTA_MNI);
        assert!(parsed.is_complete());
        assert!(find_first(&parsed.value, "consultarProcessoResposta").is_some());
        let polos = find_first(&parsed.value, "polo").expect("polos");
        assert_eq!(polos.as_array().map(|p| p.len()), Some(3));
        assert!(find_first(&parsed.value, "naoExiste").is_none());
    }
}
