use crate::RenderError;
use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::{self, Seek, Write};

const RESOURCES: ObjectId = (1, 0);
const PAGES: ObjectId = (2, 0);
const CATALOG: ObjectId = (3, 0);

/// Writes page objects as soon as they are produced and keeps only their
/// byte offsets. The page tree, catalog and info dictionary reference pages
/// that do not exist yet, so they are emitted by [`finish`](Self::finish).
pub struct StreamingPdfWriter<W: Write + Seek> {
    out: W,
    /// Byte offset of each object, indexed by object number.
    offsets: Vec<Option<u64>>,
    fonts: Dictionary,
    pages: Vec<ObjectId>,
    info: Option<Dictionary>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut out: W, version: &str, fonts: Dictionary) -> io::Result<Self> {
        write!(out, "%PDF-{version}\n%")?;
        out.write_all(&[0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(Self {
            out,
            offsets: vec![None; CATALOG.0 as usize + 1],
            fonts,
            pages: Vec::new(),
            info: None,
        })
    }

    /// Shared resource dictionary every page points at.
    pub fn resources_id(&self) -> ObjectId {
        RESOURCES
    }

    pub fn pages_id(&self) -> ObjectId {
        PAGES
    }

    fn next_id(&mut self) -> ObjectId {
        self.offsets.push(None);
        ((self.offsets.len() - 1) as u32, 0)
    }

    /// Writes `object` immediately and returns its id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.next_id();
        self.emit(id, &object)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(Dictionary::new(), content.encode()?);
        Ok(self.write_object(Object::Stream(stream))?)
    }

    pub fn push_page(&mut self, page_id: ObjectId) {
        self.pages.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    fn emit(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        self.offsets[id.0 as usize] = Some(self.out.stream_position()?);
        writeln!(self.out, "{} {} obj", id.0, id.1)?;
        object.write_pdf(&mut self.out)?;
        self.out.write_all(b"\nendobj\n")
    }

    pub fn finish(mut self) -> io::Result<W> {
        let fonts = std::mem::take(&mut self.fonts);
        self.emit(RESOURCES, &dictionary! { "Font" => fonts }.into())?;

        let kids: Vec<Object> = self.pages.iter().copied().map(Object::Reference).collect();
        let tree = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.pages.len() as i64,
        };
        self.emit(PAGES, &tree.into())?;
        self.emit(CATALOG, &dictionary! { "Type" => "Catalog", "Pages" => PAGES }.into())?;

        let mut trailer = dictionary! { "Root" => CATALOG };
        if let Some(info) = self.info.take() {
            trailer.set("Info", self.write_object(info.into())?);
        }
        trailer.set("Size", self.offsets.len() as i64);

        let xref_at = self.out.stream_position()?;
        self.write_xref()?;
        self.out.write_all(b"trailer\n")?;
        trailer.write_pdf(&mut self.out)?;
        write!(self.out, "\nstartxref\n{xref_at}\n%%EOF")?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_xref(&mut self) -> io::Result<()> {
        writeln!(self.out, "xref\n0 {}", self.offsets.len())?;
        // Object 0 heads the free list.
        self.out.write_all(b"0000000000 65535 f \n")?;
        for offset in &self.offsets[1..] {
            match offset {
                Some(at) => writeln!(self.out, "{at:010} 00000 n ")?,
                None => self.out.write_all(b"0000000000 65535 f \n")?,
            }
        }
        Ok(())
    }
}

/// Serialization of lopdf values in PDF syntax.
trait WritePdf {
    fn write_pdf(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl WritePdf for Dictionary {
    fn write_pdf(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"<<")?;
        for (key, value) in self.iter() {
            out.write_all(b"/")?;
            out.write_all(key)?;
            out.write_all(b" ")?;
            value.write_pdf(out)?;
            out.write_all(b" ")?;
        }
        out.write_all(b">>")
    }
}

impl WritePdf for Object {
    fn write_pdf(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Object::Null => out.write_all(b"null"),
            Object::Boolean(true) => out.write_all(b"true"),
            Object::Boolean(false) => out.write_all(b"false"),
            Object::Integer(i) => write!(out, "{i}"),
            Object::Real(r) => write!(out, "{r:.3}"),
            Object::Name(name) => {
                out.write_all(b"/")?;
                out.write_all(name)
            }
            Object::String(bytes, StringFormat::Literal) => {
                let mut escaped = Vec::with_capacity(bytes.len() + 2);
                escaped.push(b'(');
                for &b in bytes {
                    if matches!(b, b'(' | b')' | b'\\') {
                        escaped.push(b'\\');
                    }
                    escaped.push(b);
                }
                escaped.push(b')');
                out.write_all(&escaped)
            }
            Object::String(bytes, StringFormat::Hexadecimal) => {
                out.write_all(b"<")?;
                bytes.iter().try_for_each(|b| write!(out, "{b:02X}"))?;
                out.write_all(b">")
            }
            Object::Array(items) => {
                out.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    item.write_pdf(out)?;
                }
                out.write_all(b"]")
            }
            Object::Dictionary(dict) => dict.write_pdf(out),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                dict.write_pdf(out)?;
                out.write_all(b"\nstream\n")?;
                out.write_all(&stream.content)?;
                out.write_all(b"\nendstream")
            }
            Object::Reference((num, generation)) => write!(out, "{num} {generation} R"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_document_parses_back() {
        let writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7", Dictionary::new()).unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn literal_strings_are_escaped() {
        let mut out = Vec::new();
        Object::String(b"a(b)\\".to_vec(), StringFormat::Literal)
            .write_pdf(&mut out)
            .unwrap();
        assert_eq!(out, b"(a\\(b\\)\\\\)");
    }

    #[test]
    fn info_dictionary_is_linked_from_trailer() {
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7", Dictionary::new()).unwrap();
        writer.set_info(dictionary! {
            "Title" => Object::String(b"Quotation".to_vec(), StringFormat::Literal),
        });
        let bytes = writer.finish().unwrap().into_inner();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let info = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let title = doc.get_dictionary(info).unwrap().get(b"Title").unwrap();
        assert_eq!(title.as_str().unwrap(), b"Quotation");
    }
}
