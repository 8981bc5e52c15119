use strum::{EnumCount, EnumIter};

use crate::metadata::tables::CodedIndexType;

/// One column of a metadata table row, in the width-agnostic form of ECMA-335 II.22.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Column {
    /// A constant with a fixed number of bytes
    Fixed(u8),
    /// An index into `#Strings`
    Str,
    /// An index into `#GUID`
    Guid,
    /// An index into `#Blob`
    Blob,
    /// A simple index into another table
    Table(TableId),
    /// A coded index into one of several tables
    Coded(CodedIndexType),
}

/// The tables of a compressed `#~` stream, valued by their table number.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum TableId {
    Module = 0x00,
    TypeRef = 0x01,
    TypeDef = 0x02,
    FieldPtr = 0x03,
    Field = 0x04,
    MethodPtr = 0x05,
    MethodDef = 0x06,
    ParamPtr = 0x07,
    Param = 0x08,
    InterfaceImpl = 0x09,
    MemberRef = 0x0A,
    Constant = 0x0B,
    CustomAttribute = 0x0C,
    FieldMarshal = 0x0D,
    DeclSecurity = 0x0E,
    ClassLayout = 0x0F,
    FieldLayout = 0x10,
    StandAloneSig = 0x11,
    EventMap = 0x12,
    EventPtr = 0x13,
    Event = 0x14,
    PropertyMap = 0x15,
    PropertyPtr = 0x16,
    Property = 0x17,
    MethodSemantics = 0x18,
    MethodImpl = 0x19,
    ModuleRef = 0x1A,
    TypeSpec = 0x1B,
    ImplMap = 0x1C,
    FieldRVA = 0x1D,
    EncLog = 0x1E,
    EncMap = 0x1F,
    Assembly = 0x20,
    AssemblyProcessor = 0x21,
    AssemblyOS = 0x22,
    AssemblyRef = 0x23,
    AssemblyRefProcessor = 0x24,
    AssemblyRefOS = 0x25,
    File = 0x26,
    ExportedType = 0x27,
    ManifestResource = 0x28,
    NestedClass = 0x29,
    GenericParam = 0x2A,
    MethodSpec = 0x2B,
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// Maps a table number from the `valid` bit vector to its id.
    #[must_use]
    pub fn from_number(number: u8) -> Option<TableId> {
        use strum::IntoEnumIterator;

        TableId::iter().find(|table| *table as u8 == number)
    }

    /// The column layout of one row of this table.
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        use CodedIndexType as C;
        use Column::{Blob, Coded, Fixed, Guid, Str, Table};

        match self {
            TableId::Module => &[Fixed(2), Str, Guid, Guid, Guid],
            TableId::TypeRef => &[Coded(C::ResolutionScope), Str, Str],
            TableId::TypeDef => &[
                Fixed(4),
                Str,
                Str,
                Coded(C::TypeDefOrRef),
                Table(TableId::Field),
                Table(TableId::MethodDef),
            ],
            TableId::FieldPtr => &[Table(TableId::Field)],
            TableId::Field => &[Fixed(2), Str, Blob],
            TableId::MethodPtr => &[Table(TableId::MethodDef)],
            TableId::MethodDef => &[
                Fixed(4),
                Fixed(2),
                Fixed(2),
                Str,
                Blob,
                Table(TableId::Param),
            ],
            TableId::ParamPtr => &[Table(TableId::Param)],
            TableId::Param => &[Fixed(2), Fixed(2), Str],
            TableId::InterfaceImpl => &[Table(TableId::TypeDef), Coded(C::TypeDefOrRef)],
            TableId::MemberRef => &[Coded(C::MemberRefParent), Str, Blob],
            TableId::Constant => &[Fixed(2), Coded(C::HasConstant), Blob],
            TableId::CustomAttribute => &[
                Coded(C::HasCustomAttribute),
                Coded(C::CustomAttributeType),
                Blob,
            ],
            TableId::FieldMarshal => &[Coded(C::HasFieldMarshal), Blob],
            TableId::DeclSecurity => &[Fixed(2), Coded(C::HasDeclSecurity), Blob],
            TableId::ClassLayout => &[Fixed(2), Fixed(4), Table(TableId::TypeDef)],
            TableId::FieldLayout => &[Fixed(4), Table(TableId::Field)],
            TableId::StandAloneSig => &[Blob],
            TableId::EventMap => &[Table(TableId::TypeDef), Table(TableId::Event)],
            TableId::EventPtr => &[Table(TableId::Event)],
            TableId::Event => &[Fixed(2), Str, Coded(C::TypeDefOrRef)],
            TableId::PropertyMap => &[Table(TableId::TypeDef), Table(TableId::Property)],
            TableId::PropertyPtr => &[Table(TableId::Property)],
            TableId::Property => &[Fixed(2), Str, Blob],
            TableId::MethodSemantics => &[
                Fixed(2),
                Table(TableId::MethodDef),
                Coded(C::HasSemantics),
            ],
            TableId::MethodImpl => &[
                Table(TableId::TypeDef),
                Coded(C::MethodDefOrRef),
                Coded(C::MethodDefOrRef),
            ],
            TableId::ModuleRef => &[Str],
            TableId::TypeSpec => &[Blob],
            TableId::ImplMap => &[
                Fixed(2),
                Coded(C::MemberForwarded),
                Str,
                Table(TableId::ModuleRef),
            ],
            TableId::FieldRVA => &[Fixed(4), Table(TableId::Field)],
            TableId::EncLog => &[Fixed(4), Fixed(4)],
            TableId::EncMap => &[Fixed(4)],
            TableId::Assembly => &[
                Fixed(4),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(4),
                Blob,
                Str,
                Str,
            ],
            TableId::AssemblyProcessor => &[Fixed(4)],
            TableId::AssemblyOS => &[Fixed(4), Fixed(4), Fixed(4)],
            TableId::AssemblyRef => &[
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(4),
                Blob,
                Str,
                Str,
                Blob,
            ],
            TableId::AssemblyRefProcessor => &[Fixed(4), Table(TableId::AssemblyRef)],
            TableId::AssemblyRefOS => &[
                Fixed(4),
                Fixed(4),
                Fixed(4),
                Table(TableId::AssemblyRef),
            ],
            TableId::File => &[Fixed(4), Str, Blob],
            TableId::ExportedType => &[Fixed(4), Fixed(4), Str, Str, Coded(C::Implementation)],
            TableId::ManifestResource => &[Fixed(4), Fixed(4), Str, Coded(C::Implementation)],
            TableId::NestedClass => &[Table(TableId::TypeDef), Table(TableId::TypeDef)],
            TableId::GenericParam => &[Fixed(2), Fixed(2), Coded(C::TypeOrMethodDef), Str],
            TableId::MethodSpec => &[Coded(C::MethodDefOrRef), Blob],
            TableId::GenericParamConstraint => {
                &[Table(TableId::GenericParam), Coded(C::TypeDefOrRef)]
            }
        }
    }
}
