use lopdf::{Dictionary, Object, StringFormat, dictionary};
use tally_layout::PositionedElement;

/// A borderless link annotation covering `el` that opens `uri`.
pub fn uri_link(el: &PositionedElement, uri: &str, page_height: f32) -> Dictionary {
    let rect = vec![
        el.x.into(),
        (page_height - (el.y + el.height)).into(),
        (el.x + el.width).into(),
        (page_height - el.y).into(),
    ];
    let action = dictionary! {
        "Type" => "Action",
        "S" => "URI",
        "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
    };
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect,
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => action,
    }
}
