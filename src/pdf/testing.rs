//! In-memory documents for unit tests.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Smooth RGB gradient; compresses well as JPEG.
pub fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width.max(1)) as u8);
            data.push((y * 255 / height.max(1)) as u8);
            data.push(128);
        }
    }
    data
}

pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    shared_resources: Option<Dictionary>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            shared_resources: None,
        }
    }

    pub fn image(
        &mut self,
        width: u32,
        height: u32,
        color_space: &str,
        filter: Option<&str>,
        data: Vec<u8>,
    ) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
        };
        if let Some(filter) = filter {
            dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
        }
        self.doc.add_object(Stream::new(dict, data))
    }

    pub fn raw_rgb_image(&mut self, width: u32, height: u32, data: Vec<u8>) -> ObjectId {
        self.image(width, height, "DeviceRGB", None, data)
    }

    fn xobject_resources(images: &[ObjectId]) -> Dictionary {
        let mut xobjects = Dictionary::new();
        for (i, id) in images.iter().enumerate() {
            xobjects.set(format!("Im{}", i), Object::Reference(*id));
        }
        dictionary! { "XObject" => xobjects }
    }

    fn draw_ops(images: &[ObjectId]) -> Vec<u8> {
        images
            .iter()
            .enumerate()
            .map(|(i, _)| format!("q 100 0 0 100 {} 0 cm /Im{} Do Q\n", i * 100, i))
            .collect::<String>()
            .into_bytes()
    }

    pub fn form_with_images(&mut self, images: &[ObjectId]) -> ObjectId {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => Self::xobject_resources(images),
        };
        self.doc.add_object(Stream::new(dict, Self::draw_ops(images)))
    }

    fn push_page(&mut self, resources: Option<Dictionary>, ops: Vec<u8>) -> ObjectId {
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), ops));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        };
        if let Some(resources) = resources {
            page.set("Resources", resources);
        }
        let page_id = self.doc.add_object(page);
        self.kids.push(Object::Reference(page_id));
        page_id
    }

    pub fn page_with_images(&mut self, images: &[ObjectId]) -> ObjectId {
        self.push_page(Some(Self::xobject_resources(images)), Self::draw_ops(images))
    }

    /// Page that relies on resources set on the page tree root
    pub fn page_without_resources(&mut self) -> ObjectId {
        self.push_page(None, b"q 100 0 0 100 0 0 cm /Im0 Do Q\n".to_vec())
    }

    pub fn inherited_resources(&mut self, images: &[ObjectId]) {
        self.shared_resources = Some(Self::xobject_resources(images));
    }

    pub fn finish(mut self) -> Document {
        let mut pages = dictionary! {
            "Type" => "Pages",
            "Count" => self.kids.len() as i64,
            "Kids" => self.kids,
        };
        if let Some(resources) = self.shared_resources {
            pages.set("Resources", resources);
        }
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }
}

/// Document with `pages` empty pages
pub fn blank_document(pages: u32) -> Document {
    let mut builder = DocumentBuilder::new();
    for _ in 0..pages {
        builder.page_with_images(&[]);
    }
    builder.finish()
}
