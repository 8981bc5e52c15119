//! Assembly of [`CilType`] values from `TypeDef` rows and the member runs they own.

use crate::{
    metadata::{
        loader::{
            context::list_range,
            names::{GenericScope, TypeDefNames},
            LoaderContext,
        },
        signatures::{parse_field_signature, parse_method_signature, parse_property_signature},
        tables::{MethodSemanticsAttributes, TableId, TypeDefRaw},
        token::Token,
        typesystem::{
            Accessor, CilModule, CilType, Event, Field, FieldModifiers, MemberAccessFlags, Method,
            MethodModifiers, MethodVtableFlags, ParamFlags, Parameter, Property, TypeKind,
        },
    },
    Result,
};

impl LoaderContext<'_> {
    /// Builds the module: one [`CilType`] per `TypeDef` row, in table order.
    pub fn build_module(&self) -> Result<CilModule> {
        let name = match self.module.first() {
            Some(module) => self.string(module.name)?,
            None => return Err(malformed_error!("Module table is empty")),
        };

        let mut types = Vec::with_capacity(self.type_defs.len());
        for (index, row) in self.type_defs.iter().enumerate() {
            types.push(self.build_type(row, self.type_defs.get(index + 1))?);
        }

        Ok(CilModule {
            name,
            path: None,
            types,
        })
    }

    fn build_type(&self, row: &TypeDefRaw, next: Option<&TypeDefRaw>) -> Result<CilType> {
        let TypeDefNames {
            full_name,
            reflection_name,
        } = self.type_def_names(row.rid)?;
        let generic_params = self.generic_params_of(row.token);
        let scope = GenericScope {
            type_params: &generic_params,
            method_params: &[],
        };

        let base_type = if row.extends.is_null() {
            None
        } else {
            Some(self.token_name(row.extends.token, scope)?)
        };

        let mut interfaces = Vec::new();
        for interface in self.interfaces.get(&row.rid).into_iter().flatten() {
            interfaces.push(self.token_name(interface.token, scope)?);
        }

        let (field_start, field_end) = list_range(
            row.field_list,
            next.map(|next| next.field_list),
            self.fields.len(),
        );
        let mut fields = Vec::with_capacity((field_end - field_start) as usize);
        for rid in field_start..field_end {
            fields.push(self.build_field(rid, scope)?);
        }

        let (method_start, method_end) = list_range(
            row.method_list,
            next.map(|next| next.method_list),
            self.methods.len(),
        );
        let mut methods = Vec::with_capacity((method_end - method_start) as usize);
        for rid in method_start..method_end {
            methods.push(self.build_method(rid, &full_name, &generic_params)?);
        }

        let accessor = |method_rid: u32| -> Option<Accessor> {
            if method_rid < method_start || method_rid >= method_end {
                log::debug!(
                    "{}: accessor MethodDef {} is not owned by the type",
                    full_name,
                    method_rid
                );
                return None;
            }

            methods
                .get((method_rid - method_start) as usize)
                .map(Accessor::of)
        };

        let mut properties = Vec::new();
        if let Some(index) = self.property_maps.iter().position(|map| map.parent == row.rid) {
            let (start, end) = list_range(
                self.property_maps[index].property_list,
                self.property_maps.get(index + 1).map(|map| map.property_list),
                self.properties.len(),
            );
            for rid in start..end {
                let Some(property) = self.properties.get(rid as usize - 1) else {
                    continue;
                };

                let signature = parse_property_signature(self.blob(property.signature)?)?;
                let (getter, setter) = self.accessor_pair(
                    property.token,
                    MethodSemanticsAttributes::GETTER,
                    MethodSemanticsAttributes::SETTER,
                );

                properties.push(Property {
                    token: property.token,
                    name: self.string(property.name)?,
                    type_name: self.render(&signature.base, scope)?,
                    getter: getter.and_then(accessor),
                    setter: setter.and_then(accessor),
                });
            }
        }

        let mut events = Vec::new();
        if let Some(index) = self.event_maps.iter().position(|map| map.parent == row.rid) {
            let (start, end) = list_range(
                self.event_maps[index].event_list,
                self.event_maps.get(index + 1).map(|map| map.event_list),
                self.events.len(),
            );
            for rid in start..end {
                let Some(event) = self.events.get(rid as usize - 1) else {
                    continue;
                };

                let (add, remove) = self.accessor_pair(
                    event.token,
                    MethodSemanticsAttributes::ADD_ON,
                    MethodSemanticsAttributes::REMOVE_ON,
                );

                events.push(Event {
                    token: event.token,
                    name: self.string(event.name)?,
                    type_name: self.token_name(event.event_type.token, scope)?,
                    add: add.and_then(accessor),
                    remove: remove.and_then(accessor),
                });
            }
        }

        let enclosing = self
            .enclosing
            .get(&row.rid)
            .map(|rid| Token::from_parts(TableId::TypeDef as u8, *rid));
        let kind = TypeKind::classify(row.flags, &full_name, base_type.as_deref());

        Ok(CilType {
            token: row.token,
            namespace: self.string(row.type_namespace)?,
            name: self.string(row.type_name)?,
            full_name,
            reflection_name,
            enclosing,
            flags: row.flags,
            kind,
            base_type,
            interfaces,
            generic_params,
            fields,
            properties,
            events,
            methods,
        })
    }

    /// First `MethodDef` rids carrying each of two semantics for `association`.
    fn accessor_pair(&self, association: Token, first: u32, second: u32) -> (Option<u32>, Option<u32>) {
        let mut pair = (None, None);
        for &(semantics, method) in self.semantics.get(&association).into_iter().flatten() {
            if semantics & first != 0 && pair.0.is_none() {
                pair.0 = Some(method);
            } else if semantics & second != 0 && pair.1.is_none() {
                pair.1 = Some(method);
            }
        }

        pair
    }

    fn build_field(&self, rid: u32, scope: GenericScope) -> Result<Field> {
        let Some(row) = self.fields.get(rid as usize - 1) else {
            return Err(malformed_error!("Field row {} does not exist", rid));
        };

        let signature = parse_field_signature(self.blob(row.signature)?)?;

        Ok(Field {
            token: row.token,
            name: self.string(row.name)?,
            access: MemberAccessFlags::from_member_flags(row.flags),
            modifiers: FieldModifiers::from_field_flags(row.flags),
            type_name: self.render(&signature.base, scope)?,
        })
    }

    fn build_method(&self, rid: u32, declaring_type: &str, type_params: &[String]) -> Result<Method> {
        let Some(row) = self.methods.get(rid as usize - 1) else {
            return Err(malformed_error!("MethodDef row {} does not exist", rid));
        };

        let generic_params = self.generic_params_of(row.token);
        let scope = GenericScope {
            type_params,
            method_params: &generic_params,
        };
        let signature = parse_method_signature(self.blob(row.signature)?)?;

        let (param_start, param_end) = list_range(
            row.param_list,
            self.methods.get(rid as usize).map(|next| next.param_list),
            self.params.len(),
        );
        let param_rows = &self.params[param_start as usize - 1..param_end as usize - 1];

        let mut parameters = Vec::with_capacity(signature.params.len() + 1);
        if signature.has_this && !signature.explicit_this {
            parameters.push(Parameter {
                name: None,
                type_name: declaring_type.to_string(),
                by_ref: false,
                flags: ParamFlags::empty(),
                is_receiver: true,
            });
        }

        for (index, param) in signature.params.iter().enumerate() {
            let sequence = index as u32 + 1;
            let declared = param_rows.iter().find(|row| row.sequence == sequence);

            let name = match declared {
                Some(declared) => Some(self.string(declared.name)?).filter(|name| !name.is_empty()),
                None => None,
            };

            parameters.push(Parameter {
                name,
                type_name: self.render(&param.base, scope)?,
                by_ref: param.by_ref,
                flags: declared
                    .map(|declared| ParamFlags::from_bits_truncate(declared.flags))
                    .unwrap_or_default(),
                is_receiver: false,
            });
        }

        let return_type = self.render(&signature.return_type.base, scope)?;
        let return_type = if signature.return_type.by_ref {
            format!("{return_type}&")
        } else {
            return_type
        };

        Ok(Method {
            token: row.token,
            name: self.string(row.name)?,
            access: MemberAccessFlags::from_member_flags(row.flags),
            vtable: MethodVtableFlags::from_method_flags(row.flags),
            modifiers: MethodModifiers::from_method_flags(row.flags),
            generic_params,
            return_type,
            parameters,
        })
    }
}
