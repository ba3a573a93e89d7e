// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — build the output document by copying pages out of loaded
// inputs, rotating them, and serialising the result with `lopdf`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Local};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use pdfpipe_core::PipeConfig;
use pdfpipe_core::error::PdfPipeError;
use pdfpipe_core::types::Rotation;
use tracing::{debug, info, instrument, warn};

use super::reader::PdfReader;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic /Parent chains in broken files.
const MAX_TREE_DEPTH: usize = 64;

/// Maps object IDs of one input document onto their copies in the output.
///
/// Shared resources (fonts, images, content streams) are copied once per
/// input and reused by every page that refers to them.
pub type ObjectMap = HashMap<ObjectId, ObjectId>;

/// Assembles a new PDF out of pages from loaded inputs.
pub struct PdfWriter {
    document: Document,
    /// The output's single /Pages node.
    pages_id: ObjectId,
    /// Output pages in order.
    page_ids: Vec<ObjectId>,
    title: String,
    author: String,
    stamp_dates: bool,
    compress: bool,
}

impl PdfWriter {
    /// Create an empty output document.
    pub fn new(config: &PipeConfig) -> Self {
        let mut document = Document::with_version(config.pdf_version.as_str());
        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            title: config.title.clone(),
            author: config.author.clone(),
            stamp_dates: config.stamp_dates,
            compress: config.compress,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    // -- Page copying ---------------------------------------------------------

    /// Append a copy of the page at the 0-based `page` index of `source`.
    ///
    /// Every call creates a new page object, so appending the same source
    /// page twice yields two independent output pages. Objects the page
    /// refers to are copied once per input and tracked in `copied`, except
    /// the page's annotations, which belong to a single page and are copied
    /// afresh each time.
    pub fn append_page(
        &mut self,
        source: &PdfReader,
        page: usize,
        copied: &mut ObjectMap,
    ) -> Result<ObjectId, PdfPipeError> {
        let source_id = source.page_id(page).ok_or_else(|| {
            PdfPipeError::Pdf(format!(
                "page {} not found in {} ({} pages)",
                page + 1,
                source.name(),
                source.page_count()
            ))
        })?;
        let source_doc = source.document();
        let page_dict = source_doc.get_dictionary(source_id).map_err(|err| {
            PdfPipeError::Pdf(format!("cannot read page object {:?}: {}", source_id, err))
        })?;

        let new_id = self.document.new_object_id();
        let mut scope = PageScope {
            source,
            source_id,
            new_id,
            shared: copied,
            private: annotation_ids(source_doc, page_dict),
            local: ObjectMap::new(),
        };

        let mut new_dict = Dictionary::new();
        for (key, value) in page_dict.iter() {
            // /Parent is re-pointed at the output's page tree below.
            if key == b"Parent" {
                continue;
            }
            let cloned = self.copy_object(&mut scope, value);
            new_dict.set(key.clone(), cloned);
        }

        for key in INHERITABLE {
            if new_dict.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source_doc, page_dict, key) {
                let cloned = self.copy_object(&mut scope, value);
                new_dict.set(key.to_vec(), cloned);
            }
        }

        new_dict.set("Parent", Object::Reference(self.pages_id));
        self.document
            .objects
            .insert(new_id, Object::Dictionary(new_dict));
        self.page_ids.push(new_id);

        debug!(source = source.name(), page = page + 1, ?new_id, "Page copied");
        Ok(new_id)
    }

    /// Deep-copy an object into the output document.
    fn copy_object(&mut self, scope: &mut PageScope<'_>, object: &Object) -> Object {
        match object {
            Object::Reference(ref_id) => self.copy_reference(scope, *ref_id),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(scope, dict)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(scope, item))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let mut new_stream = stream.clone();
                new_stream.dict = self.copy_dictionary(scope, &stream.dict);
                Object::Stream(new_stream)
            }
            // Boolean, Integer, Real, String, Name, Null.
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, scope: &mut PageScope<'_>, dict: &Dictionary) -> Dictionary {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            let cloned = self.copy_object(scope, value);
            new_dict.set(key.clone(), cloned);
        }
        new_dict
    }

    fn copy_reference(&mut self, scope: &mut PageScope<'_>, ref_id: ObjectId) -> Object {
        // Back-references to the page being copied (e.g. an annotation's /P)
        // point at the new page.
        if ref_id == scope.source_id {
            return Object::Reference(scope.new_id);
        }
        // Other pages and the page tree itself are not part of this copy.
        if scope.source.is_page(ref_id) {
            return Object::Null;
        }
        if let Some(existing) = scope.copies(ref_id).get(&ref_id) {
            return Object::Reference(*existing);
        }

        let source = scope.source;
        let referenced = match source.document().get_object(ref_id) {
            Ok(obj) => obj,
            Err(err) => {
                warn!(?ref_id, %err, "Cannot resolve reference, using Null");
                return Object::Null;
            }
        };
        if is_page_tree_node(referenced) {
            return Object::Null;
        }

        // Register before recursing so reference cycles terminate.
        let new_id = self.document.new_object_id();
        scope.copies(ref_id).insert(ref_id, new_id);
        let cloned = self.copy_object(scope, referenced);
        self.document.objects.insert(new_id, cloned);
        Object::Reference(new_id)
    }

    // -- Rotation -------------------------------------------------------------

    /// Turn the output page at the 0-based `page` index by `rotation`, on top
    /// of whatever /Rotate it already carries.
    pub fn rotate_page(&mut self, page: usize, rotation: Rotation) -> Result<(), PdfPipeError> {
        let page_id = *self.page_ids.get(page).ok_or_else(|| {
            PdfPipeError::Pdf(format!(
                "output page {} not found (output has {} pages)",
                page + 1,
                self.page_ids.len()
            ))
        })?;

        let dict = self
            .document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| PdfPipeError::Pdf(format!("cannot rotate page {}: {}", page + 1, err)))?;

        let existing = dict
            .get(b"Rotate")
            .ok()
            .and_then(|r| r.as_i64().ok())
            .unwrap_or(0);
        let new_rotation = (existing + i64::from(rotation.degrees())).rem_euclid(360);
        dict.set("Rotate", Object::Integer(new_rotation));

        debug!(page = page + 1, existing, new_rotation, "Page rotated");
        Ok(())
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the output document.
    #[instrument(skip(self), fields(pages = self.page_ids.len()))]
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, PdfPipeError> {
        self.finish_page_tree();
        self.write_info(Local::now());
        if self.compress {
            self.document.compress();
        }

        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            PdfPipeError::Pdf(format!("failed to serialise output PDF: {}", err))
        })?;

        debug!(output_bytes = output.len(), "Output serialised");
        Ok(output)
    }

    /// Serialise and write the output document to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), PdfPipeError> {
        let bytes = self.save_to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote output PDF to {}", path.as_ref().display());
        Ok(())
    }

    /// Borrow the document as currently assembled.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn finish_page_tree(&mut self) {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;
        if let Ok(Object::Dictionary(pages)) = self.document.get_object_mut(self.pages_id) {
            pages.set("Kids", kids);
            pages.set("Count", count);
        }
    }

    fn write_info(&mut self, now: DateTime<Local>) {
        let mut info = dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
            "Author" => Object::string_literal(self.author.as_str()),
            "Producer" => Object::string_literal(concat!("pdfpipe ", env!("CARGO_PKG_VERSION"))),
        };
        if self.stamp_dates {
            let stamp = pdf_date(now);
            info.set("CreationDate", Object::string_literal(stamp.as_str()));
            info.set("ModDate", Object::string_literal(stamp));
        }

        let existing = self
            .document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .ok();
        match existing {
            Some(info_id) => {
                self.document.objects.insert(info_id, Object::Dictionary(info));
            }
            None => {
                let info_id = self.document.add_object(info);
                self.document.trailer.set("Info", info_id);
            }
        }
    }
}

/// The page currently being copied, and where its copy lives.
struct PageScope<'a> {
    source: &'a PdfReader,
    source_id: ObjectId,
    new_id: ObjectId,
    /// Copies shared by every page taken from the same input.
    shared: &'a mut ObjectMap,
    /// Objects owned by this page alone (its annotations).
    private: HashSet<ObjectId>,
    /// Copies made for this page only.
    local: ObjectMap,
}

impl PageScope<'_> {
    fn copies(&mut self, ref_id: ObjectId) -> &mut ObjectMap {
        if self.private.contains(&ref_id) {
            &mut self.local
        } else {
            &mut *self.shared
        }
    }
}

/// IDs of the page's /Annots array and of every annotation it lists.
fn annotation_ids(document: &Document, page: &Dictionary) -> HashSet<ObjectId> {
    let mut ids = HashSet::new();
    let annots = match page.get(b"Annots") {
        Ok(Object::Reference(id)) => {
            ids.insert(*id);
            document.get_object(*id).ok()
        }
        Ok(other) => Some(other),
        Err(_) => None,
    };
    if let Some(Object::Array(items)) = annots {
        ids.extend(items.iter().filter_map(|item| item.as_reference().ok()));
    }
    ids
}

/// Walk /Parent links looking for an inheritable attribute.
fn inherited_attribute<'a>(
    document: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = document.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
    }
    None
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => dict
            .get(b"Type")
            .and_then(Object::as_name)
            .is_ok_and(|name| name == b"Pages"),
        _ => false,
    }
}

/// Format a timestamp as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
fn pdf_date(time: DateTime<Local>) -> String {
    let offset = time.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    format!(
        "D:{}{}{:02}'{:02}'",
        time.format("%Y%m%d%H%M%S"),
        sign,
        offset / 3600,
        (offset % 3600) / 60
    )
}
