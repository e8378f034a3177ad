//! Property-based tests for the type-shape tree.
//!
//! Random trees are assembled from leaf spellings and the five composite
//! shapes, then bound at a root. The properties checked hold for every
//! well-formed tree:
//! 1. Binding always succeeds and every generated identifier is distinct
//! 2. Complexity is at least 1 at every node
//! 3. An emptiness test exists exactly when a zero expression does
//! 4. Type names are computed once
//! 5. Copies bind independently of the original
//! 6. Pointers dereference everything except records and identifiers

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use packgen_ir::visitor::{walk_elem, Visitor};
use packgen_ir::{
    Array, BaseElem, Elem, Map, NamingContext, Primitive, Ptr, Slice, Struct, StructField,
};
use proptest::prelude::*;

// -- Tree Generation Strategies --

const LEAF_SPELLINGS: &[&str] = &[
    "string",
    "float64",
    "[]byte",
    "int32",
    "bool",
    "time.Time",
    "msgp.Extension",
    "json.Number",
    "any",
    "complex64",
    "Foo",
    "pkg.Bar",
    "msgp.Raw",
];

fn leaf_strategy() -> impl Strategy<Value = Elem> {
    prop::sample::select(LEAF_SPELLINGS).prop_map(|spelling| Elem::from(BaseElem::ident(spelling)))
}

fn record_strategy(inner: BoxedStrategy<Elem>) -> impl Strategy<Value = Elem> {
    prop::collection::vec(inner, 0..4).prop_map(|elems| {
        let fields = elems
            .into_iter()
            .enumerate()
            .map(|(i, elem)| {
                let tag = format!("f{i}");
                StructField::new(format!("F{i}"), &tag, "", elem)
            })
            .collect();
        Elem::from(Struct::new(fields))
    })
}

/// Generate a tree of at most `depth` composite levels.
fn elem_strategy(depth: u32) -> BoxedStrategy<Elem> {
    if depth == 0 {
        leaf_strategy().boxed()
    } else {
        let inner = elem_strategy(depth - 1);
        prop_oneof![
            leaf_strategy(),
            inner.clone().prop_map(|e| Elem::from(Ptr::new(e))),
            inner.clone().prop_map(|e| Elem::from(Slice::new(e))),
            inner.clone().prop_map(|e| Elem::from(Map::new(e))),
            (1usize..8, inner.clone())
                .prop_map(|(n, e)| Elem::from(Array::new(n.to_string(), e))),
            record_strategy(inner),
        ]
        .boxed()
    }
}

fn root_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("z".to_string()),
        Just("z.Field".to_string()),
        Just("za0001".to_string()),
        Just("*p".to_string()),
    ]
}

// -- Helpers --

/// Every node in the tree, in visit order.
#[derive(Default)]
struct Nodes<'e>(Vec<&'e Elem>);

impl<'e> Visitor<'e> for Nodes<'e> {
    fn visit_elem(&mut self, elem: &'e Elem) {
        self.0.push(elem);
        walk_elem(self, elem);
    }
}

fn nodes(tree: &Elem) -> Vec<&Elem> {
    let mut collector = Nodes::default();
    collector.visit_elem(tree);
    collector.0
}

/// Identifiers introduced by the naming pass.
fn generated_names(tree: &Elem) -> Vec<String> {
    let mut names = Vec::new();
    for node in nodes(tree) {
        match node {
            Elem::Array(array) => names.push(array.index().to_string()),
            Elem::Slice(slice) => names.push(slice.index().to_string()),
            Elem::Map(map) => {
                names.push(map.key_binding().to_string());
                names.push(map.value_binding().to_string());
            }
            _ => {}
        }
    }
    names
}

fn varnames(tree: &Elem) -> Vec<String> {
    nodes(tree)
        .into_iter()
        .map(|node| node.varname().to_string())
        .collect()
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_binding_succeeds(mut tree in elem_strategy(4), root in root_strategy()) {
        let mut names = NamingContext::default();
        prop_assert!(tree.bind_root(&root, &mut names).is_ok());

        let generated = generated_names(&tree);
        let mut unique = generated.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), generated.len());
        // rejected candidates are counted but never bound
        prop_assert!(names.allocated() as usize >= generated.len());
    }

    #[test]
    fn prop_complexity_positive(tree in elem_strategy(4)) {
        for node in nodes(&tree) {
            prop_assert!(node.complexity() >= 1);
        }
    }

    #[test]
    fn prop_zero_and_emptiness_pair(mut tree in elem_strategy(4)) {
        tree.bind_root("z", &mut NamingContext::default()).unwrap();
        for node in nodes(&tree) {
            match node.zero_expr() {
                Some(zero) => prop_assert_eq!(
                    node.if_zero_expr(),
                    Some(format!("{} == {}", node.varname(), zero))
                ),
                None => prop_assert_eq!(node.if_zero_expr(), None),
            }
        }
    }

    #[test]
    fn prop_type_name_memoized(tree in elem_strategy(4)) {
        for node in nodes(&tree) {
            let first = node.type_name();
            prop_assert!(std::ptr::eq(first, node.type_name()));
        }
    }

    #[test]
    fn prop_copy_binds_independently(mut tree in elem_strategy(4)) {
        tree.bind_root("z", &mut NamingContext::default()).unwrap();
        let before = varnames(&tree);

        let mut copy = tree.deep_copy();
        prop_assert_eq!(&copy, &tree);
        copy.bind_root("other", &mut NamingContext::default()).unwrap();

        prop_assert_eq!(varnames(&tree), before);
        prop_assert_eq!(copy.varname(), "other");
    }

    #[test]
    fn prop_pointer_dereference_rules(mut tree in elem_strategy(4), root in root_strategy()) {
        tree.bind_root(&root, &mut NamingContext::default()).unwrap();
        for node in nodes(&tree) {
            let Elem::Ptr(ptr) = node else { continue };
            let path = ptr.value().varname();
            match ptr.value() {
                Elem::Struct(_) => prop_assert_eq!(path, node.varname()),
                Elem::Base(leaf) if leaf.primitive() == Primitive::Ident => {
                    prop_assert_eq!(path, node.varname());
                }
                // an extension behind a pointer is already addressable
                Elem::Base(leaf) if leaf.primitive() == Primitive::Extension => {
                    prop_assert_eq!(path, node.varname());
                }
                _ => prop_assert_eq!(path, format!("*{}", node.varname())),
            }
        }
    }
}
