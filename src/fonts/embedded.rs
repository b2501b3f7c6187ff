use crate::{
    refs::{ObjectReferences, RefType},
    Error, Pt,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType or OpenType font. Embedded fonts are written to the PDF in their
/// entirety, so large decorative fonts will noticeably increase the size of every
/// certificate that uses them.
pub struct EmbeddedFont {
    pub face: OwnedFace,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("name", &self.name())
            .finish()
    }
}

impl EmbeddedFont {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(EmbeddedFont { face })
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, if it declares one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if it declares one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.face.as_face_ref().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for characters the font doesn't cover: the replacement
    /// character, then `?`, then `.notdef`
    pub fn replacement_glyph_id(&self) -> u16 {
        self.glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default()
    }

    /// Calculate the width of a run of text, measuring uncovered characters
    /// as the replacement glyph they will be drawn with
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        text.chars()
            .map(|ch| {
                let gid = self.glyph_id(ch).unwrap_or_else(|| self.replacement_glyph_id());
                scaling * self.advance(gid) as f32
            })
            .sum()
    }

    /// Encode text as big-endian 2-byte glyph ids for an `Identity-H` font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| {
                self.glyph_id(ch)
                    .unwrap_or_else(|| self.replacement_glyph_id())
                    .to_be_bytes()
            })
            .collect()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let declared = self.cid_widths();

        // the widest glyph doubles as the default width
        let default_width = declared.values().copied().fold(0.0, f32::max);

        let mut widths = cid_font.widths();

        // split the sorted glyph ids into runs of consecutive ids
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, &width) in declared.iter() {
            match run_start {
                Some(start) if (gid - start) as usize == run.len() => {}
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
                None => run_start = Some(gid),
            }
            run.push(width);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    /// Widths for the CID font's `W` array, in thousandths of an em. Covers
    /// `.notdef` and every mapped glyph, using the same advances as
    /// [`width_of_text`](Self::width_of_text) so drawn and measured widths agree.
    fn cid_widths(&self) -> BTreeMap<u16, f32> {
        let scaling = self.scaling();
        std::iter::once(0)
            .chain(self.glyph_ids().into_keys())
            .map(|gid| (gid, self.advance(gid) as f32 * scaling))
            .collect()
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        let data = self.face.as_slice();
        let compressed = compress_to_vec_zlib(data, CompressionLevel::DefaultLevel as u8);
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let sizing = self.glyphs_sizing();
        let max_width = sizing
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = sizing
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = sizing.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face.as_face_ref();
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = self.scaling();
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: face.descender() as f32 * scaling,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(face.tables().post.map(|post| post.italic_angle).unwrap_or_default());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    /// Every glyph reachable from a unicode cmap subtable, keyed by glyph id
    fn glyph_ids(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();

        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Glyph id => (char, (advance, height))
    fn glyphs_sizing(&self) -> BTreeMap<u16, (char, (u16, i16))> {
        let face = self.face.as_face_ref();
        self.glyph_ids()
            .into_iter()
            .filter_map(|(id, ch)| {
                let gid = face.glyph_index(ch)?;
                let h_advance = face.glyph_hor_advance(gid)?;
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((id, (ch, (h_advance, height))))
            })
            .collect()
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        // bfchar blocks hold at most 100 entries sharing a common high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (id, ch) in self.glyph_ids() {
            match blocks.last_mut() {
                Some(block)
                    if block.len() < 100
                        && block.first().map(|&(first, _)| first >> 8) == Some(id >> 8) =>
                {
                    block.push((id, ch))
                }
                _ => blocks.push(vec![(id, ch)]),
            }
        }

        for block in blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{id:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed =
            compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }

    /// Write the Type0 font and its descendants, returning the reference the
    /// page resources should point at
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);

        font_id
    }
}
