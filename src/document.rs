use crate::command::DrawCommand;
use crate::content::{render_contents, PageResources};
use crate::fonts::FontRegistry;
use crate::image::Image;
use crate::info::Info;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::Error;
use pdf_writer::{Finish, Name, Pdf};
use std::io::Write;

/// A single-page document: the page size, the commands drawn on it and the
/// resources those commands refer to. Rendered out with [Document::write].
pub struct Document<'a> {
    pub info: Option<Info>,
    pub width: Pt,
    pub height: Pt,
    pub commands: &'a [DrawCommand],
    pub fonts: &'a FontRegistry,
    /// The image drawn by [DrawCommand::Image], if any
    pub image: Option<&'a Image>,
}

impl Document<'_> {
    /// Write the entire document to the writer. The document is built in
    /// memory first and written in one go.
    ///
    /// Objects are numbered in a fixed order (catalog, page tree, info, page,
    /// fonts, image, graphics states, content) and only the fonts the
    /// commands actually use are embedded, in the order they are first used,
    /// so identical inputs produce identical bytes.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), Error> {
        let Document {
            info,
            width,
            height,
            commands,
            fonts,
            image,
        } = self;

        let resources = PageResources::collect(commands);
        let image = match (resources.image, image) {
            (true, None) => return Err(Error::MissingImage),
            (true, Some(image)) => Some(image),
            (false, _) => None,
        };

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_id = refs.gen(RefType::Page);
        writer.pages(page_tree_id).count(1).kids([page_id]);

        for (index, font) in resources.fonts() {
            fonts[font].write(&mut refs, index, &mut writer);
        }

        if let Some(image) = image {
            image.write(&mut refs, &mut writer);
        }

        for (index, &opacity) in resources.opacities.iter().enumerate() {
            let id = refs.gen(RefType::GraphicsState(index));
            writer
                .ext_graphics(id)
                .non_stroking_alpha(opacity)
                .stroking_alpha(opacity);
        }

        let content_id = refs.gen(RefType::Content);
        let mut page = writer.page(page_id);
        page.media_box(Rect::from_origin(Pt(0.0), Pt(0.0), width, height).into());
        page.parent(page_tree_id);
        page.contents(content_id);

        // resource names point at the objects generated for them above
        let mut page_resources = page.resources();
        let mut resource_fonts = page_resources.fonts();
        for (index, _) in resources.fonts() {
            if let Some(id) = refs.get(RefType::Font(index)) {
                resource_fonts.pair(Name(format!("F{index}").as_bytes()), id);
            }
        }
        resource_fonts.finish();
        if let Some(id) = refs.get(RefType::Image) {
            page_resources.x_objects().pair(Name(b"Im0"), id);
        }
        if !resources.opacities.is_empty() {
            let mut states = page_resources.ext_g_states();
            for index in 0..resources.opacities.len() {
                if let Some(id) = refs.get(RefType::GraphicsState(index)) {
                    states.pair(Name(format!("GS{index}").as_bytes()), id);
                }
            }
            states.finish();
        }
        page_resources.finish();
        page.finish();

        let rendered = render_contents(commands, fonts, &resources);
        log::debug!(
            "page content: {} commands, {} bytes",
            commands.len(),
            rendered.len()
        );
        writer.stream(content_id, rendered.as_slice());

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::tests::jorge_jara;
    use crate::compose::tests::compose_default;
    use crate::pagesize::A5;

    fn write(document: Document) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        document.write(&mut bytes)?;
        Ok(bytes)
    }

    #[test]
    fn writes_a_single_page_pdf() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let bytes = write(Document {
            info: None,
            width: A5.0,
            height: A5.1,
            commands: &commands,
            fonts: &fonts,
            image: None,
        })
        .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Type /Page"));
        assert!(text.contains("/BaseFont /Times-Bold"));
        assert!(text.contains("/ExtGState"));
        assert!(text.contains("/ca "));
        assert!(!text.contains("/Times-Roman"));
        assert!(!text.contains("/Im0"));
    }

    #[test]
    fn resources_point_at_the_objects_written_for_them() {
        let (fonts, commands) = compose_default(&jorge_jara());
        let bytes = write(Document {
            info: None,
            width: A5.0,
            height: A5.1,
            commands: &commands,
            fonts: &fonts,
            image: None,
        })
        .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        // catalog 1, page tree 2, page 3, then three fonts and one state
        assert!(text.contains("/F0 4 0 R"));
        assert!(text.contains("/F1 5 0 R"));
        assert!(text.contains("/F2 6 0 R"));
        assert!(text.contains("/GS0 7 0 R"));
    }

    #[test]
    fn image_command_without_image_is_an_error() {
        let fonts = FontRegistry::new();
        let commands = [DrawCommand::Image {
            position: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
        }];
        let result = write(Document {
            info: None,
            width: A5.0,
            height: A5.1,
            commands: &commands,
            fonts: &fonts,
            image: None,
        });
        assert!(matches!(result, Err(Error::MissingImage)));
    }
}
