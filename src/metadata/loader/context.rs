//! `LoaderContext` - the heaps and raw rows a module is built from.
//!
//! Rows are read once into owned `*Raw` vectors indexed by `rid - 1`, and the relation
//! tables (`NestedClass`, `InterfaceImpl`, `GenericParam`, `MethodSemantics`) are folded
//! into lookup maps keyed by the owning row.

use std::collections::HashMap;

use crate::{
    metadata::{
        streams::{Blob, Strings, TablesHeader},
        tables::{
            CodedIndex, EventMapRaw, EventRaw, FieldRaw, GenericParamRaw, InterfaceImplRaw,
            MethodDefRaw, MethodSemanticsRaw, ModuleRaw, NestedClassRaw, ParamRaw,
            PropertyMapRaw, PropertyRaw, RowReadable, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    Result,
};

/// Reads every row of the table holding `T`, empty if the table is absent.
fn read_rows<T: RowReadable>(tables: &TablesHeader) -> Result<Vec<T>> {
    match tables.table::<T>()? {
        Some(table) => table.rows(),
        None => Ok(Vec::new()),
    }
}

/// Returns the half-open rid range `[start, next_start)` of a list column, clipped to
/// the rows of the target table.
pub(crate) fn list_range(start: u32, next_start: Option<u32>, target_rows: usize) -> (u32, u32) {
    let end_of_table = target_rows as u32 + 1;
    let start = start.clamp(1, end_of_table);
    let end = next_start.unwrap_or(end_of_table).clamp(start, end_of_table);

    (start, end)
}

pub(crate) struct LoaderContext<'a> {
    pub strings: Strings<'a>,
    pub blobs: Option<Blob<'a>>,

    pub module: Vec<ModuleRaw>,
    pub type_refs: Vec<TypeRefRaw>,
    pub type_defs: Vec<TypeDefRaw>,
    pub type_specs: Vec<TypeSpecRaw>,
    pub fields: Vec<FieldRaw>,
    pub methods: Vec<MethodDefRaw>,
    pub params: Vec<ParamRaw>,
    pub event_maps: Vec<EventMapRaw>,
    pub events: Vec<EventRaw>,
    pub property_maps: Vec<PropertyMapRaw>,
    pub properties: Vec<PropertyRaw>,

    /// Nested `TypeDef` rid to enclosing `TypeDef` rid
    pub enclosing: HashMap<u32, u32>,
    /// `TypeDef` rid to implemented interfaces, in table order
    pub interfaces: HashMap<u32, Vec<CodedIndex>>,
    /// Owner token (`TypeDef` or `MethodDef`) to generic parameter names ordered by number
    pub generic_params: HashMap<Token, Vec<String>>,
    /// Property or event token to `(semantics, MethodDef rid)` pairs
    pub semantics: HashMap<Token, Vec<(u32, u32)>>,
}

impl<'a> LoaderContext<'a> {
    pub fn new(
        tables: TablesHeader<'a>,
        strings: Strings<'a>,
        blobs: Option<Blob<'a>>,
    ) -> Result<Self> {
        let mut enclosing = HashMap::new();
        for row in read_rows::<NestedClassRaw>(&tables)? {
            enclosing.insert(row.nested_class, row.enclosing_class);
        }

        let mut interfaces: HashMap<u32, Vec<CodedIndex>> = HashMap::new();
        for row in read_rows::<InterfaceImplRaw>(&tables)? {
            interfaces.entry(row.class).or_default().push(row.interface);
        }

        let mut numbered: HashMap<Token, Vec<(u32, String)>> = HashMap::new();
        for row in read_rows::<GenericParamRaw>(&tables)? {
            let name = strings.get(row.name as usize)?.to_string();
            numbered
                .entry(row.owner.token)
                .or_default()
                .push((row.number, name));
        }
        let generic_params = numbered
            .into_iter()
            .map(|(owner, mut params)| {
                params.sort_by_key(|(number, _)| *number);
                (owner, params.into_iter().map(|(_, name)| name).collect())
            })
            .collect();

        let mut semantics: HashMap<Token, Vec<(u32, u32)>> = HashMap::new();
        for row in read_rows::<MethodSemanticsRaw>(&tables)? {
            semantics
                .entry(row.association.token)
                .or_default()
                .push((row.semantics, row.method));
        }

        Ok(LoaderContext {
            module: read_rows(&tables)?,
            type_refs: read_rows(&tables)?,
            type_defs: read_rows(&tables)?,
            type_specs: read_rows(&tables)?,
            fields: read_rows(&tables)?,
            methods: read_rows(&tables)?,
            params: read_rows(&tables)?,
            event_maps: read_rows(&tables)?,
            events: read_rows(&tables)?,
            property_maps: read_rows(&tables)?,
            properties: read_rows(&tables)?,
            strings,
            blobs,
            enclosing,
            interfaces,
            generic_params,
            semantics,
        })
    }

    /// Identifier at `index` of the `#Strings` heap.
    pub fn string(&self, index: u32) -> Result<String> {
        Ok(self.strings.get(index as usize)?.to_string())
    }

    /// Blob at `index` of the `#Blob` heap.
    pub fn blob(&self, index: u32) -> Result<&'a [u8]> {
        match &self.blobs {
            Some(blobs) => blobs.get(index as usize),
            None => Err(malformed_error!(
                "Signature blob {} referenced without a #Blob stream",
                index
            )),
        }
    }

    /// Generic parameter names declared by `owner`.
    pub fn generic_params_of(&self, owner: Token) -> Vec<String> {
        self.generic_params.get(&owner).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ranges() {
        // two owners over five rows: [1, 3) and [3, 6)
        assert_eq!(list_range(1, Some(3), 5), (1, 3));
        assert_eq!(list_range(3, None, 5), (3, 6));

        // empty target table
        assert_eq!(list_range(1, None, 0), (1, 1));

        // out of range starts are clipped, never inverted
        assert_eq!(list_range(9, Some(2), 5), (6, 6));
        assert_eq!(list_range(0, Some(2), 5), (1, 2));
    }
}
