use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the document writer emits, keyed by the arena
/// index (or page position) of the thing it belongs to
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image(usize),
    ImageMask(usize),
}

/// Hands out object numbers and remembers which object each one was given to
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

    /// Look up the object number previously allocated for `ref_type`
    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Allocate a fresh object number for `ref_type`
    pub fn allocate(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }

    /// The object number for `ref_type`, allocating one on first use
    pub fn get_or_allocate(&mut self, ref_type: RefType) -> Ref {
        match self.get(ref_type) {
            Some(id) => id,
            None => self.allocate(ref_type),
        }
    }
}
