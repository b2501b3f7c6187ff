use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page,
    Content,
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image,
    ImageMask,
    GraphicsState(usize),
}

/// Hands out sequential object ids and remembers which object each one was
/// generated for. Ids are allocated in call order, so a fixed write order
/// yields a byte-identical document.
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    fn new_id(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.new_id();
        self.refs.insert(ref_type, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_remembered() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.gen(RefType::Catalog);
        let tree = refs.gen(RefType::PageTree);
        assert_eq!(catalog, Ref::new(1));
        assert_eq!(tree, Ref::new(2));
        assert_eq!(refs.get(RefType::PageTree), Some(tree));
        assert_eq!(refs.get(RefType::Page), None);
    }

    #[test]
    fn regenerating_a_role_points_at_the_newest_object() {
        let mut refs = ObjectReferences::new();
        refs.gen(RefType::Font(0));
        let latest = refs.gen(RefType::Font(0));
        assert_eq!(latest, Ref::new(2));
        assert_eq!(refs.get(RefType::Font(0)), Some(latest));
    }
}
