//! lopdf backend: one PDF page per sheet side

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::logo::LogoImage;
use super::paint::{Font, LineStyle, PaintCommand, SidePaint};
use super::text::encode_win_ansi;
use crate::layout::GridLayout;
use crate::types::{BookletError, Result};

/// XObject name of the back cover logo
const LOGO_NAME: &str = "Logo";

/// Build the output document from painted sheet sides.
pub fn write_document(
    sides: &[SidePaint],
    grid: &GridLayout,
    logo: Option<&LogoImage>,
) -> Result<Document> {
    if sides.is_empty() {
        return Err(BookletError::Config("Nothing to print".to_string()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_tree_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc, logo);

    let width = grid.sheet_width_pt();
    let height = grid.sheet_height_pt();
    let mut page_refs = Vec::with_capacity(sides.len());

    for side in sides {
        let content = content_stream(&side.commands, logo.is_some());
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
        ]);
        page_refs.push(Object::Reference(doc.add_object(page)));
    }

    finalize_document(&mut doc, pages_tree_id, page_refs);
    doc.compress();

    log::debug!("Wrote {} sheet sides", sides.len());
    Ok(doc)
}

/// Fonts and logo shared by every page
fn add_resources(doc: &mut Document, logo: Option<&LogoImage>) -> ObjectId {
    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(font.base_font().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    if let Some(logo) = logo {
        let image_id = doc.add_object(logo.to_stream());
        let mut xobjects = Dictionary::new();
        xobjects.set(LOGO_NAME, Object::Reference(image_id));
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    doc.add_object(resources)
}

/// Serialize paint commands as content stream operators
pub fn content_stream(commands: &[PaintCommand], has_logo: bool) -> String {
    let mut ops = String::new();

    for command in commands {
        match command {
            PaintCommand::SaveState => ops.push_str("q\n"),
            PaintCommand::RestoreState => ops.push_str("Q\n"),
            PaintCommand::Transform([a, b, c, d, e, f]) => {
                ops.push_str(&format!("{} {} {} {} {} {} cm\n", a, b, c, d, e, f));
            }
            PaintCommand::Text {
                font,
                size,
                x,
                y,
                text,
            } => {
                ops.push_str(&format!(
                    "BT /{} {} Tf {} {} Td <{}> Tj ET\n",
                    font.resource_name(),
                    size,
                    x,
                    y,
                    hex(&encode_win_ansi(text))
                ));
            }
            PaintCommand::Line { from, to, style } => {
                ops.push_str(&stroke_style(style));
                ops.push_str(&format!(
                    "{} {} m {} {} l S\n",
                    from.0, from.1, to.0, to.1
                ));
            }
            PaintCommand::Image {
                x,
                y,
                width,
                height,
            } => {
                if has_logo {
                    ops.push_str(&format!(
                        "q {} 0 0 {} {} {} cm /{} Do Q\n",
                        width, height, x, y, LOGO_NAME
                    ));
                }
            }
        }
    }

    ops
}

fn stroke_style(style: &LineStyle) -> String {
    let dash = match style.dash {
        Some([on, off]) => format!("[{} {}] 0 d", on, off),
        None => "[] 0 d".to_string(),
    };
    format!("{} w {} G {}\n", style.width, style.gray, dash)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Create pages tree and catalog
fn finalize_document(doc: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    doc.trailer.set("Root", catalog_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{SheetSide, create_grid_layout};
    use crate::types::FoldTopology;

    fn side(commands: Vec<PaintCommand>) -> SidePaint {
        SidePaint {
            sheet_index: 0,
            side: SheetSide::Front,
            commands,
        }
    }

    #[test]
    fn test_text_operators() {
        let ops = content_stream(
            &[PaintCommand::Text {
                font: Font::Bold,
                size: 12.0,
                x: 10.0,
                y: 20.5,
                text: "Été".to_string(),
            }],
            false,
        );
        assert_eq!(ops, "BT /F2 12 Tf 10 20.5 Td <C974E9> Tj ET\n");
    }

    #[test]
    fn test_transform_and_states() {
        let ops = content_stream(
            &[
                PaintCommand::SaveState,
                PaintCommand::Transform([0.0, 1.0, -1.0, 0.0, 100.0, 0.0]),
                PaintCommand::RestoreState,
            ],
            false,
        );
        assert_eq!(ops, "q\n0 1 -1 0 100 0 cm\nQ\n");
    }

    #[test]
    fn test_dashed_line() {
        let ops = content_stream(
            &[PaintCommand::Line {
                from: (0.0, 0.0),
                to: (0.0, 50.0),
                style: LineStyle {
                    width: 0.5,
                    gray: 0.5,
                    dash: Some([3.0, 3.0]),
                },
            }],
            false,
        );
        assert_eq!(ops, "0.5 w 0.5 G [3 3] 0 d\n0 0 m 0 50 l S\n");
    }

    #[test]
    fn test_image_needs_logo() {
        let image = PaintCommand::Image {
            x: 1.0,
            y: 2.0,
            width: 30.0,
            height: 40.0,
        };
        assert_eq!(content_stream(&[image.clone()], false), "");
        assert_eq!(
            content_stream(&[image], true),
            "q 30 0 0 40 1 2 cm /Logo Do Q\n"
        );
    }

    #[test]
    fn test_page_per_side() {
        let grid = create_grid_layout(FoldTopology::FourPanel, 842.0, 595.0);
        let sides = vec![side(Vec::new()), side(Vec::new()), side(Vec::new())];
        let doc = write_document(&sides, &grid, None).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_logo_embedded_once() {
        let grid = create_grid_layout(FoldTopology::TwoPanel, 842.0, 595.0);
        let logo = LogoImage {
            width: 1,
            height: 1,
            rgb: vec![0, 0, 0],
        };
        let sides = vec![side(Vec::new()), side(Vec::new())];
        let doc = write_document(&sides, &grid, Some(&logo)).unwrap();
        let images = doc
            .objects
            .values()
            .filter(|o| match o {
                Object::Stream(s) => {
                    s.dict.get(b"Subtype").and_then(|o| o.as_name()).ok() == Some(b"Image".as_slice())
                }
                _ => false,
            })
            .count();
        assert_eq!(images, 1);
    }

    #[test]
    fn test_no_sides_rejected() {
        let grid = create_grid_layout(FoldTopology::TwoPanel, 842.0, 595.0);
        assert!(matches!(
            write_document(&[], &grid, None),
            Err(BookletError::Config(_))
        ));
    }
}
