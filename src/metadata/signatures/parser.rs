use crate::{
    file::parser::Parser,
    metadata::signatures::{
        SignatureField, SignatureMethod, SignatureParameter, SignatureProperty, TypeSignature,
        ELEMENT_TYPE,
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum nesting of types within one signature
const MAX_RECURSION_DEPTH: usize = 50;

/// Calling convention byte of a field signature
const SIG_FIELD: u8 = 0x06;
/// Calling convention bit of a property signature
const SIG_PROPERTY: u8 = 0x08;
/// Calling convention bit for generic methods
const SIG_GENERIC: u8 = 0x10;
/// Calling convention bit for instance members
const SIG_HAS_THIS: u8 = 0x20;
/// Calling convention bit for an explicit receiver
const SIG_EXPLICIT_THIS: u8 = 0x40;

/// Parses one signature blob.
///
/// A parser is bound to a single blob; create a new one per signature.
///
/// ```rust
/// use dotscribe::metadata::signatures::{SignatureParser, TypeSignature};
///
/// let mut parser = SignatureParser::new(&[0x06, 0x1D, 0x0E]);
/// let field = parser.parse_field_signature()?;
/// assert_eq!(field.base, TypeSignature::SzArray(Box::new(TypeSignature::String)));
/// # Ok::<(), dotscribe::Error>(())
/// ```
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Creates a parser over `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeSignature> {
        let current_byte = self.parser.read_le::<u8>()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::PTR => {
                self.skip_custom_mods()?;
                Ok(TypeSignature::Ptr(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(
                self.parser.read_compressed_token()?,
            )),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.parser.read_compressed_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let elem_type = self.parse_type()?;
                let rank = self.parser.read_compressed_uint()?;

                // Sizes and lower bounds do not show up in rendered names.
                let num_sizes = self.parser.read_compressed_uint()?;
                for _ in 0..num_sizes {
                    self.parser.read_compressed_uint()?;
                }
                let num_lo_bounds = self.parser.read_compressed_uint()?;
                for _ in 0..num_lo_bounds {
                    self.parser.read_compressed_uint()?;
                }

                Ok(TypeSignature::Array(Box::new(elem_type), rank))
            }
            ELEMENT_TYPE::SZARRAY => {
                self.skip_custom_mods()?;
                Ok(TypeSignature::SzArray(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.parser.peek_byte()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not CLASS or VALUETYPE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.parse_type()?;
                let arg_count = self.parser.read_compressed_uint()?;

                let mut type_args = Vec::with_capacity(arg_count.min(64) as usize);
                for _ in 0..arg_count {
                    type_args.push(self.parse_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::FNPTR => Ok(TypeSignature::FnPtr(Box::new(
                self.parse_method_signature()?,
            ))),
            ELEMENT_TYPE::CMOD_REQD | ELEMENT_TYPE::CMOD_OPT => {
                self.parser.read_compressed_token()?;
                self.parse_type()
            }
            ELEMENT_TYPE::PINNED => self.parse_type(),
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    fn skip_custom_mods(&mut self) -> Result<()> {
        while self.parser.has_more_data() {
            let next_byte = self.parser.peek_byte()?;
            if next_byte != ELEMENT_TYPE::CMOD_OPT && next_byte != ELEMENT_TYPE::CMOD_REQD {
                break;
            }

            self.parser.advance()?;
            self.parser.read_compressed_token()?;
        }

        Ok(())
    }

    fn parse_param(&mut self) -> Result<SignatureParameter> {
        self.skip_custom_mods()?;

        let mut by_ref = false;
        if self.parser.peek_byte()? == ELEMENT_TYPE::BYREF {
            self.parser.advance()?;
            by_ref = true;
        }

        Ok(SignatureParameter {
            by_ref,
            base: self.parse_type()?,
        })
    }

    /// Parses a `MethodDefSig`, `MethodRefSig` or the method part of a function pointer.
    ///
    /// The vararg sentinel is skipped; parameters after it are appended to `params`.
    ///
    /// # Errors
    /// Returns an error if the blob is malformed or truncated.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let convention_byte = self.parser.read_le::<u8>()?;

        let generic_param_count = if convention_byte & SIG_GENERIC != 0 {
            self.parser.read_compressed_uint()?
        } else {
            0
        };
        let param_count = self.parser.read_compressed_uint()?;
        let return_type = self.parse_param()?;

        let mut params = Vec::with_capacity(param_count.min(256) as usize);
        for _ in 0..param_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                self.parser.advance()?;
            }

            params.push(self.parse_param()?);
        }

        Ok(SignatureMethod {
            has_this: convention_byte & SIG_HAS_THIS != 0,
            explicit_this: convention_byte & SIG_EXPLICIT_THIS != 0,
            generic_param_count,
            return_type,
            params,
        })
    }

    /// Parses a `FieldSig`.
    ///
    /// # Errors
    /// Returns an error if the blob does not start with `FIELD` or is truncated.
    pub fn parse_field_signature(&mut self) -> Result<SignatureField> {
        let head_byte = self.parser.read_le::<u8>()?;
        if head_byte != SIG_FIELD {
            return Err(malformed_error!(
                "SignatureField - invalid start - {}",
                head_byte
            ));
        }

        self.skip_custom_mods()?;

        Ok(SignatureField {
            base: self.parse_type()?,
        })
    }

    /// Parses a `PropertySig`.
    ///
    /// # Errors
    /// Returns an error if the blob does not start with `PROPERTY` or is truncated.
    pub fn parse_property_signature(&mut self) -> Result<SignatureProperty> {
        let head_byte = self.parser.read_le::<u8>()?;
        if head_byte & SIG_PROPERTY == 0 {
            return Err(malformed_error!(
                "SignatureProperty - invalid start - {}",
                head_byte
            ));
        }

        let param_count = self.parser.read_compressed_uint()?;
        self.skip_custom_mods()?;
        let base = self.parse_type()?;

        let mut params = Vec::with_capacity(param_count.min(256) as usize);
        for _ in 0..param_count {
            params.push(self.parse_param()?);
        }

        Ok(SignatureProperty {
            has_this: head_byte & SIG_HAS_THIS != 0,
            base,
            params,
        })
    }

    /// Parses the type of a `TypeSpec` blob.
    ///
    /// # Errors
    /// Returns an error if the blob is malformed or truncated.
    pub fn parse_type_spec_signature(&mut self) -> Result<TypeSignature> {
        self.parse_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::token::Token;

    #[test]
    fn primitive_fields() {
        let test_cases = [
            (0x02, TypeSignature::Boolean),
            (0x03, TypeSignature::Char),
            (0x04, TypeSignature::I1),
            (0x05, TypeSignature::U1),
            (0x06, TypeSignature::I2),
            (0x07, TypeSignature::U2),
            (0x08, TypeSignature::I4),
            (0x09, TypeSignature::U4),
            (0x0A, TypeSignature::I8),
            (0x0B, TypeSignature::U8),
            (0x0C, TypeSignature::R4),
            (0x0D, TypeSignature::R8),
            (0x0E, TypeSignature::String),
            (0x18, TypeSignature::I),
            (0x19, TypeSignature::U),
            (0x1C, TypeSignature::Object),
        ];

        for (element, expected) in test_cases {
            let field = SignatureParser::new(&[0x06, element])
                .parse_field_signature()
                .unwrap();
            assert_eq!(field.base, expected);
        }
    }

    #[test]
    fn field_bad_start() {
        assert!(SignatureParser::new(&[0x07, 0x08])
            .parse_field_signature()
            .is_err());
    }

    #[test]
    fn field_custom_modifiers_skipped() {
        // modreq(TypeRef 1) int32, and volatile-style modopt in type position
        let field = SignatureParser::new(&[0x06, 0x1F, 0x05, 0x08])
            .parse_field_signature()
            .unwrap();
        assert_eq!(field.base, TypeSignature::I4);

        let spec = SignatureParser::new(&[0x1D, 0x20, 0x05, 0x0E])
            .parse_type_spec_signature()
            .unwrap();
        assert_eq!(spec, TypeSignature::SzArray(Box::new(TypeSignature::String)));
    }

    #[test]
    fn class_tokens() {
        // TypeDef 1, TypeRef 2, TypeSpec 3
        let cases = [
            (0x04, Token::new(0x0200_0001)),
            (0x09, Token::new(0x0100_0002)),
            (0x0E, Token::new(0x1B00_0003)),
        ];

        for (coded, expected) in cases {
            let spec = SignatureParser::new(&[0x12, coded])
                .parse_type_spec_signature()
                .unwrap();
            assert_eq!(spec, TypeSignature::Class(expected));
        }
    }

    #[test]
    fn generic_instance() {
        // List`1<int32> where List`1 is TypeRef 3
        let spec = SignatureParser::new(&[0x15, 0x12, 0x0D, 0x01, 0x08])
            .parse_type_spec_signature()
            .unwrap();

        assert_eq!(
            spec,
            TypeSignature::GenericInst(
                Box::new(TypeSignature::Class(Token::new(0x0100_0003))),
                vec![TypeSignature::I4]
            )
        );
    }

    #[test]
    fn generic_instance_requires_class() {
        assert!(SignatureParser::new(&[0x15, 0x08, 0x01, 0x08])
            .parse_type_spec_signature()
            .is_err());
    }

    #[test]
    fn general_array() {
        // int32[,] with sizes [2, 3] and lower bounds [0, 0]
        let spec = SignatureParser::new(&[0x14, 0x08, 0x02, 0x02, 0x02, 0x03, 0x02, 0x00, 0x00])
            .parse_type_spec_signature()
            .unwrap();

        assert_eq!(spec, TypeSignature::Array(Box::new(TypeSignature::I4), 2));
    }

    #[test]
    fn method_instance_byref() {
        // instance void M(int32&, !!0)
        let method = SignatureParser::new(&[0x30, 0x01, 0x02, 0x01, 0x10, 0x08, 0x1E, 0x00])
            .parse_method_signature()
            .unwrap();

        assert!(method.has_this);
        assert!(!method.explicit_this);
        assert_eq!(method.generic_param_count, 1);
        assert_eq!(method.return_type.base, TypeSignature::Void);
        assert_eq!(method.params.len(), 2);
        assert!(method.params[0].by_ref);
        assert_eq!(method.params[0].base, TypeSignature::I4);
        assert!(!method.params[1].by_ref);
        assert_eq!(method.params[1].base, TypeSignature::GenericParamMethod(0));
    }

    #[test]
    fn method_vararg_sentinel() {
        // vararg void M(int32, ..., string)
        let method = SignatureParser::new(&[0x05, 0x02, 0x01, 0x08, 0x41, 0x0E])
            .parse_method_signature()
            .unwrap();

        assert_eq!(method.params.len(), 2);
        assert_eq!(method.params[1].base, TypeSignature::String);
    }

    #[test]
    fn property_signature() {
        // instance string this[int32]
        let property = SignatureParser::new(&[0x28, 0x01, 0x0E, 0x08])
            .parse_property_signature()
            .unwrap();

        assert!(property.has_this);
        assert_eq!(property.base, TypeSignature::String);
        assert_eq!(property.params.len(), 1);

        assert!(SignatureParser::new(&[0x06, 0x00, 0x08])
            .parse_property_signature()
            .is_err());
    }

    #[test]
    fn function_pointer() {
        let spec = SignatureParser::new(&[0x1B, 0x00, 0x00, 0x01])
            .parse_type_spec_signature()
            .unwrap();

        assert!(matches!(spec, TypeSignature::FnPtr(_)));
    }

    #[test]
    fn recursion_limit() {
        let mut data = vec![0x1D; 60];
        data.push(0x08);

        assert!(matches!(
            SignatureParser::new(&data).parse_type_spec_signature(),
            Err(RecursionLimit(MAX_RECURSION_DEPTH))
        ));
    }

    #[test]
    fn depth_released_between_params() {
        // 60 parameters of type int32[][], total nesting stays at 3
        let mut data = vec![0x00, 60, 0x01];
        for _ in 0..60 {
            data.extend_from_slice(&[0x1D, 0x1D, 0x08]);
        }

        let method = SignatureParser::new(&data).parse_method_signature().unwrap();
        assert_eq!(method.params.len(), 60);
    }

    #[test]
    fn truncated() {
        assert!(SignatureParser::new(&[0x20, 0x02, 0x01, 0x08])
            .parse_method_signature()
            .is_err());
    }
}
