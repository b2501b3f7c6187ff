use crate::refs::{ObjectReferences, RefType};
use chrono::{Datelike, NaiveDate};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// General document metadata such as title, author, etc
#[derive(Default, Debug, Clone)]
pub struct Info {
    /// The title of the document.
    pub title: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
    /// The subject of the document.
    pub subject: Option<String>,
    /// The creation date recorded in the document. Supplied by the caller rather
    /// than read from the clock so identical inputs give identical bytes.
    pub creation_date: Option<NaiveDate>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Set the title of the info block, modifying `self`
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the author of the info block, modifying `self`
    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    /// Set the subject of the info block, modifying `self`
    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the creation date of the info block, modifying `self`
    pub fn creation_date(&mut self, date: NaiveDate) -> &mut Self {
        self.creation_date = Some(date);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        if let Some(date) = self.creation_date {
            let date = PDate::new(date.year().clamp(0, 9999) as u16)
                .month(date.month() as u8)
                .day(date.day() as u8);
            info.creation_date(date);
        }
    }
}
