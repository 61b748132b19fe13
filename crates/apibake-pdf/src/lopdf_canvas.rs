use std::collections::HashMap;
use std::io::Write;

use apibake_core::LayoutError;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::canvas::{Canvas, Color, FontFace, OutlineId, Rect};
use crate::encoding::to_win_ansi;

/// US Letter, in points.
pub const LETTER: (f32, f32) = (612.0, 792.0);

#[derive(Debug, Default)]
struct Page {
    operations: Vec<Operation>,
    links: Vec<(Rect, String)>,
}

#[derive(Debug)]
struct OutlineEntry {
    parent: Option<OutlineId>,
    title: String,
    page: usize,
    y: f32,
}

/// [`Canvas`] that builds a PDF with `lopdf` and writes it to `sink` on [`finish`](Canvas::finish).
///
/// Text uses the standard Type1 fonts with WinAnsi encoding; characters it lacks print as `?`.
pub struct PdfCanvas<W: Write> {
    sink: W,
    page_size: (f32, f32),
    pages: Vec<Page>,
    current: usize,
    /// First registration of a name wins.
    destinations: HashMap<String, (usize, f32)>,
    outline: Vec<OutlineEntry>,
    title: Option<String>,
    finished: bool,
}

impl<W: Write> PdfCanvas<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            page_size: LETTER,
            pages: Vec::new(),
            current: 0,
            destinations: HashMap::new(),
            outline: Vec::new(),
            title: None,
            finished: false,
        }
    }

    /// Document title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn page_mut(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.add_page();
        }
        let index = self.current.min(self.pages.len() - 1);
        &mut self.pages[index]
    }

    fn to_pdf_rect(&self, rect: &Rect) -> Vec<Object> {
        let (_, height) = self.page_size;
        vec![
            rect.x.into(),
            (height - (rect.y + rect.height)).into(),
            (rect.x + rect.width).into(),
            (height - rect.y).into(),
        ]
    }

    fn destination(&self, page_id: ObjectId, y: f32) -> Vec<Object> {
        let (_, height) = self.page_size;
        vec![
            Object::Reference(page_id),
            "XYZ".into(),
            Object::Null,
            (height - y).into(),
            Object::Null,
        ]
    }

    fn build(&self) -> Result<Document, LayoutError> {
        let (width, height) = self.page_size;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        // Links may point forward, so every page id exists before any page is written
        let page_ids: Vec<ObjectId> = self.pages.iter().map(|_| doc.new_object_id()).collect();
        for (page, &page_id) in self.pages.iter().zip(&page_ids) {
            let content = Content {
                operations: page.operations.clone(),
            };
            let bytes = content.encode().map_err(pdf_error)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));

            let mut annots = Vec::new();
            for (rect, name) in &page.links {
                let Some(&(target, y)) = self.destinations.get(name) else {
                    log::warn!("link to unknown destination `{name}` dropped");
                    continue;
                };
                let annot = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => self.to_pdf_rect(rect),
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "Dest" => self.destination(page_ids[target], y),
                };
                annots.push(Object::Reference(doc.add_object(annot)));
            }

            let mut dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if !annots.is_empty() {
                dict.set("Annots", annots);
            }
            doc.objects.insert(page_id, Object::Dictionary(dict));
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => pages_id };
        if let Some(outlines_id) = self.write_outline(&mut doc, &page_ids) {
            catalog.set("Outlines", outlines_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::String(b"apibake".to_vec(), StringFormat::Literal),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }

    /// Bookmark tree; children start collapsed.
    fn write_outline(&self, doc: &mut Document, page_ids: &[ObjectId]) -> Option<ObjectId> {
        if self.outline.is_empty() {
            return None;
        }
        let root_id = doc.new_object_id();
        let ids: Vec<ObjectId> = self.outline.iter().map(|_| doc.new_object_id()).collect();

        let mut roots = Vec::new();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.outline.len()];
        for (i, entry) in self.outline.iter().enumerate() {
            match entry.parent.filter(|&p| p < i) {
                Some(parent) => children[parent].push(i),
                None => roots.push(i),
            }
        }

        let mut dicts: Vec<Dictionary> = self
            .outline
            .iter()
            .map(|entry| {
                dictionary! {
                    "Title" => Object::String(to_win_ansi(&entry.title), StringFormat::Literal),
                    "Dest" => self.destination(page_ids[entry.page], entry.y),
                }
            })
            .collect();

        link_siblings(&roots, root_id, &ids, &mut dicts);
        for (i, kids) in children.iter().enumerate() {
            let (Some(&first), Some(&last)) = (kids.first(), kids.last()) else {
                continue;
            };
            dicts[i].set("First", ids[first]);
            dicts[i].set("Last", ids[last]);
            dicts[i].set("Count", -(kids.len() as i64));
            link_siblings(kids, ids[i], &ids, &mut dicts);
        }
        for (&id, dict) in ids.iter().zip(dicts) {
            doc.objects.insert(id, Object::Dictionary(dict));
        }

        let (&first, &last) = (roots.first()?, roots.last()?);
        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => ids[first],
                "Last" => ids[last],
                "Count" => roots.len() as i64,
            }),
        );
        Some(root_id)
    }
}

fn link_siblings(items: &[usize], parent: ObjectId, ids: &[ObjectId], dicts: &mut [Dictionary]) {
    for (k, &i) in items.iter().enumerate() {
        dicts[i].set("Parent", parent);
        if k > 0 {
            dicts[i].set("Prev", ids[items[k - 1]]);
        }
        if let Some(&next) = items.get(k + 1) {
            dicts[i].set("Next", ids[next]);
        }
    }
}

fn pdf_error(e: impl std::fmt::Display) -> LayoutError {
    LayoutError::Pdf(e.to_string())
}

fn color_operands(color: Color) -> Vec<Object> {
    vec![color.r.into(), color.g.into(), color.b.into()]
}

impl<W: Write> Canvas for PdfCanvas<W> {
    fn page_size(&self) -> (f32, f32) {
        self.page_size
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn switch_to_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        } else {
            log::warn!("no page {index}, staying on page {}", self.current);
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font: FontFace, size: f32, color: Color) {
        let (_, height) = self.page_size;
        let ops = &mut self.page_mut().operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
        ));
        ops.push(Operation::new("rg", color_operands(color)));
        ops.push(Operation::new("Td", vec![x.into(), (height - baseline).into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (_, height) = self.page_size;
        let ops = &mut self.page_mut().operations;
        ops.push(Operation::new("rg", color_operands(color)));
        ops.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                (height - (rect.y + rect.height)).into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    fn add_destination(&mut self, name: &str, y: f32) {
        let page = self.current;
        self.destinations
            .entry(name.to_string())
            .or_insert((page, y));
    }

    fn add_link(&mut self, rect: Rect, destination: &str) {
        self.page_mut().links.push((rect, destination.to_string()));
    }

    fn add_outline_item(&mut self, parent: Option<OutlineId>, title: &str, y: f32) -> OutlineId {
        if self.pages.is_empty() {
            self.add_page();
        }
        self.outline.push(OutlineEntry {
            parent,
            title: title.to_string(),
            page: self.current,
            y,
        });
        self.outline.len() - 1
    }

    fn finish(&mut self) -> Result<(), LayoutError> {
        if self.finished {
            return Err(LayoutError::Finished);
        }
        self.finished = true;
        if self.pages.is_empty() {
            self.add_page();
        }
        let mut doc = self.build()?;
        doc.save_to(&mut self.sink).map_err(pdf_error)?;
        self.sink.flush()?;
        log::debug!("wrote {} pages", self.pages.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(canvas: PdfCanvas<Vec<u8>>) -> Document {
        let mut canvas = canvas;
        canvas.finish().unwrap();
        Document::load_mem(&canvas.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let doc = finished(PdfCanvas::new(Vec::new()));
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_links_resolve_to_destinations() {
        let mut canvas = PdfCanvas::new(Vec::new());
        canvas.add_page();
        let rect = Rect {
            x: 70.0,
            y: 100.0,
            width: 40.0,
            height: 12.0,
        };
        canvas.add_link(rect, "Demo:Pet");
        canvas.add_link(rect, "Demo:Missing");
        canvas.add_page();
        canvas.add_destination("Demo:Pet", 50.0);
        canvas.add_destination("Demo:Pet", 400.0);

        let doc = finished(canvas);
        let pages = doc.get_pages();
        let first = doc.get_dictionary(pages[&1]).unwrap();
        let annots = first.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);

        let annot = doc
            .get_dictionary(annots[0].as_reference().unwrap())
            .unwrap();
        let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
        assert_eq!(dest[0].as_reference().unwrap(), pages[&2]);
        assert_eq!(dest[3].as_float().unwrap(), 792.0 - 50.0);
    }

    #[test]
    fn test_outline_tree() {
        let mut canvas = PdfCanvas::new(Vec::new());
        canvas.add_page();
        let root = canvas.add_outline_item(None, "Store", 50.0);
        canvas.add_outline_item(Some(root), "GET /pets", 80.0);
        canvas.add_outline_item(Some(root), "POST /pets", 200.0);
        canvas.add_outline_item(None, "Schemas", 300.0);

        let doc = finished(canvas);
        let catalog = doc.catalog().unwrap();
        let outlines_id = catalog.get(b"Outlines").unwrap().as_reference().unwrap();
        let outlines = doc.get_dictionary(outlines_id).unwrap();
        assert_eq!(outlines.get(b"Count").unwrap().as_i64().unwrap(), 2);

        let store_id = outlines.get(b"First").unwrap().as_reference().unwrap();
        let store = doc.get_dictionary(store_id).unwrap();
        assert_eq!(store.get(b"Title").unwrap().as_str().unwrap(), b"Store");
        assert_eq!(store.get(b"Count").unwrap().as_i64().unwrap(), -2);
        assert!(store.get(b"Next").is_ok());

        let get_id = store.get(b"First").unwrap().as_reference().unwrap();
        let get = doc.get_dictionary(get_id).unwrap();
        assert_eq!(get.get(b"Title").unwrap().as_str().unwrap(), b"GET /pets");
        assert_eq!(get.get(b"Parent").unwrap().as_reference().unwrap(), store_id);
    }

    #[test]
    fn test_finish_twice_fails() {
        let mut canvas = PdfCanvas::new(Vec::new());
        canvas.finish().unwrap();
        assert!(matches!(canvas.finish(), Err(LayoutError::Finished)));
        assert!(canvas.into_inner().starts_with(b"%PDF-1.5"));
    }
}
