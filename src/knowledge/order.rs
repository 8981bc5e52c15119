//! Deterministic selection, ordering and grouping of types and members.
//!
//! All comparisons are ordinal (byte-wise on UTF-8), so the same module always produces
//! the same sequence regardless of locale.

use std::collections::BTreeMap;

use crate::{
    knowledge::NamespaceFilter,
    metadata::typesystem::{CilModule, CilType},
};

/// Types of `module` that pass the filter, compiler-generated types removed, ordered by
/// full name.
#[must_use]
pub fn selected_types<'m>(module: &'m CilModule, filter: &NamespaceFilter) -> Vec<&'m CilType> {
    let mut types: Vec<&CilType> = module
        .types
        .iter()
        .filter(|ty| !ty.is_compiler_generated())
        .filter(|ty| filter.should_include(&ty.namespace))
        .collect();

    types.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    types
}

/// The same types ordered by simple name, ties broken by full name.
#[must_use]
pub fn by_simple_name<'m>(types: &[&'m CilType]) -> Vec<&'m CilType> {
    let mut sorted = types.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.full_name.cmp(&b.full_name)));
    sorted
}

/// One namespace and its types, in the order they were given.
#[derive(Debug)]
pub struct NamespaceGroup<'m> {
    /// Namespace as stored in metadata, possibly empty
    pub namespace: &'m str,
    /// Member types
    pub types: Vec<&'m CilType>,
}

/// Groups types by raw namespace; groups are ordered by key, the empty namespace first.
#[must_use]
pub fn group_by_namespace<'m>(types: &[&'m CilType]) -> Vec<NamespaceGroup<'m>> {
    let mut groups: BTreeMap<&'m str, Vec<&'m CilType>> = BTreeMap::new();
    for ty in types {
        groups.entry(ty.namespace.as_str()).or_default().push(ty);
    }

    groups
        .into_iter()
        .map(|(namespace, types)| NamespaceGroup { namespace, types })
        .collect()
}

/// Items filtered by `keep` and stably sorted by `name`.
pub fn sorted_members<'t, T, K, N>(items: &'t [T], keep: K, name: N) -> Vec<&'t T>
where
    K: Fn(&T) -> bool,
    N: Fn(&T) -> &str,
{
    let mut members: Vec<&T> = items.iter().filter(|item| keep(*item)).collect();
    members.sort_by(|a, b| name(*a).cmp(name(*b)));
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::model::{module, TypeBuilder};

    fn sample() -> CilModule {
        let player = TypeBuilder::class("", "Player").build();
        let inner = TypeBuilder::nested(&player, "Inner").build();

        module(
            "Assembly-CSharp.dll",
            vec![
                TypeBuilder::class("", "<Module>").build(),
                TypeBuilder::class("InnerNet", "Zeta").build(),
                TypeBuilder::class("UnityEngine", "Camera").build(),
                player,
                TypeBuilder::class("InnerNet", "Alpha").build(),
                inner,
                TypeBuilder::class("", "<>c__DisplayClass1").build(),
                TypeBuilder::class("", "Alpha").build(),
            ],
        )
    }

    fn names<'a>(types: &[&'a CilType]) -> Vec<&'a str> {
        types.iter().map(|ty| ty.full_name.as_str()).collect()
    }

    #[test]
    fn selection_is_filtered_and_ordered() {
        let module = sample();
        let filter = NamespaceFilter::from_config(&Default::default());
        let types = selected_types(&module, &filter);

        assert_eq!(
            names(&types),
            ["Alpha", "InnerNet.Alpha", "InnerNet.Zeta", "Player", "Player/Inner"]
        );

        assert_eq!(
            names(&by_simple_name(&types)),
            ["Alpha", "InnerNet.Alpha", "Player/Inner", "Player", "InnerNet.Zeta"]
        );
    }

    #[test]
    fn grouping_keeps_type_order() {
        let module = sample();
        let filter = NamespaceFilter::from_config(&Default::default());
        let groups = group_by_namespace(&selected_types(&module, &filter));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].namespace, "");
        assert_eq!(names(&groups[0].types), ["Alpha", "Player", "Player/Inner"]);
        assert_eq!(groups[1].namespace, "InnerNet");
        assert_eq!(names(&groups[1].types), ["InnerNet.Alpha", "InnerNet.Zeta"]);
    }

    #[test]
    fn members_sorted_stably() {
        let items = [("b", 1), ("a", 2), ("b", 3), ("c", 4)];
        let sorted = sorted_members(&items, |item| item.1 != 4, |item| item.0);

        assert_eq!(sorted, [&("a", 2), &("b", 1), &("b", 3)]);
    }
}
