//! services/xml_service.rs
//! Converte respostas SOAP/XML em um objeto solto (`serde_json::Value`) que o
//! mapeador MNI consegue percorrer sem conhecer o schema.
//!
//! Regras da conversão:
//! - prefixos de namespace são descartados (só o nome local fica);
//! - atributos viram chaves com prefixo `@` (declarações `xmlns` são ignoradas);
//! - filhos repetidos viram array, filho único vira valor;
//! - elemento só com texto vira string; texto ao lado de atributos/filhos vai em `#text`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Prefixo usado para atributos
pub const ATTR_PREFIX: &str = "@";
/// Chave do texto quando o elemento também tem atributos ou filhos
pub const TEXT_KEY: &str = "#text";

/// Resultado da leitura. Se o XML quebrar no meio, `value` traz o que foi lido
/// até ali e `error` explica o motivo.
#[derive(Debug, Clone)]
pub struct ParsedXml {
    pub value: Value,
    pub error: Option<String>,
}

impl ParsedXml {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Default)]
struct Node {
    name: String,
    attrs: Vec<(String, Value)>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Node {
    fn open(start: &BytesStart) -> Self {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attrs = Vec::new();

        for attr in start.attributes().flatten() {
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            attrs.push((format!("{}{}", ATTR_PREFIX, key), Value::String(value)));
        }

        Node {
            name,
            attrs,
            ..Default::default()
        }
    }

    fn into_value(self) -> Value {
        let text = self.text.trim().to_string();
        if self.attrs.is_empty() && self.children.is_empty() {
            return Value::String(text);
        }

        let mut map = Map::new();
        for (k, v) in self.attrs {
            map.insert(k, v);
        }
        for (k, v) in self.children {
            push_child(&mut map, k, v);
        }
        if !text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::String(text));
        }
        Value::Object(map)
    }
}

/// Filhos de mesmo nome são agrupados em array, na ordem do documento.
fn push_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Lê o XML inteiro. Nunca falha: erros de sintaxe encerram a leitura e os
/// elementos ainda abertos são fechados com o conteúdo já lido.
pub fn parse_xml(xml: &str) -> ParsedXml {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // a base da pilha é o "documento"
    let mut stack: Vec<Node> = vec![Node::default()];
    let mut error: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Node::open(&e)),
            Ok(Event::Empty(e)) => {
                let node = Node::open(&e);
                close_into_parent(&mut stack, node);
            }
            Ok(Event::End(_)) => {
                if stack.len() > 1 {
                    if let Some(node) = stack.pop() {
                        close_into_parent(&mut stack, node);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let text = match t.unescape() {
                    Ok(s) => s.into_owned(),
                    Err(_) => String::from_utf8_lossy(&t).into_owned(),
                };
                append_text(&mut stack, &text);
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                append_text(&mut stack, &text);
            }
            Ok(Event::Eof) => {
                if stack.len() > 1 {
                    error = Some(format!(
                        "XML truncado: {} elemento(s) sem fechamento",
                        stack.len() - 1
                    ));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error = Some(format!(
                    "Erro de sintaxe XML na posição {}: {}",
                    reader.buffer_position(),
                    e
                ));
                break;
            }
        }
    }

    // fecha o que ficou aberto (documento parcial)
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            close_into_parent(&mut stack, node);
        }
    }

    if let Some(msg) = &error {
        log::warn!("(parse_xml) Leitura parcial do XML: {}", msg);
    }

    let root = stack.pop().unwrap_or_default();
    let value = if root.children.is_empty() {
        Value::Object(Map::new())
    } else {
        let mut map = Map::new();
        for (k, v) in root.children {
            push_child(&mut map, k, v);
        }
        Value::Object(map)
    };

    ParsedXml { value, error }
}

fn close_into_parent(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        let name = node.name.clone();
        parent.children.push((name, node.into_value()));
    }
}

fn append_text(stack: &mut [Node], text: &str) {
    if let Some(current) = stack.last_mut() {
        if !current.text.is_empty() && !text.is_empty() {
            current.text.push(' ');
        }
        current.text.push_str(text);
    }
}

/// Busca em profundidade a primeira ocorrência de `key`, em qualquer nível.
pub fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                return Some(found);
            }
            map.values().find_map(|v| find_first(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_first(v, key)),
        _ => None,
    }
}
