use crate::{filter::compiler::FilterCompiler, predicate::DisjunctList};
use model::execution::expr::{CompoundOp, Expr, ExprKind};
use serde::Serialize;
use tracing::debug;

/// Flatten the top-level AND chain of a WHERE clause into its conjuncts.
///
/// Conjuncts come back left to right; anything that is not a binary AND is a
/// conjunct on its own, including an AND nested under OR or NOT.
pub fn split_conjuncts(root: &Expr) -> Vec<&Expr> {
    let mut conjuncts = Vec::new();
    collect_conjuncts(root, &mut conjuncts);
    conjuncts
}

fn collect_conjuncts<'e>(expr: &'e Expr, out: &mut Vec<&'e Expr>) {
    match &expr.kind {
        ExprKind::CompoundPred {
            op: CompoundOp::And,
            children,
        } if children.len() == 2 => {
            collect_conjuncts(&children[0], out);
            collect_conjuncts(&children[1], out);
        }
        _ => out.push(expr),
    }
}

/// A conjunct the backend will evaluate, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushedConjunct {
    pub index: usize,
    pub disjuncts: DisjunctList,
}

/// Outcome of offering every conjunct to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConjunctPartition {
    pub pushed: Vec<PushedConjunct>,
    /// Indexes of conjuncts that must stay in the local filter.
    pub local: Vec<usize>,
}

impl ConjunctPartition {
    pub fn is_fully_pushed(&self) -> bool {
        self.local.is_empty()
    }
}

/// Compile each conjunct independently and split them into pushed and local.
///
/// A rejected conjunct never affects the others.
pub fn partition_conjuncts<'e, C>(
    conjuncts: impl IntoIterator<Item = &'e Expr>,
    compiler: &C,
) -> ConjunctPartition
where
    C: FilterCompiler<Filter = DisjunctList> + ?Sized,
{
    let mut partition = ConjunctPartition::default();

    for (index, conjunct) in conjuncts.into_iter().enumerate() {
        match compiler.compile(conjunct) {
            Ok(disjuncts) => partition.pushed.push(PushedConjunct { index, disjuncts }),
            Err(_) => partition.local.push(index),
        }
    }

    debug!(
        "Pushed {} conjunct(s) down, {} stay local",
        partition.pushed.len(),
        partition.local.len()
    );

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter::disjunct::DisjunctExtractor, settings::PushdownSettings};
    use expression_engine::ConstantFolder;
    use model::core::{
        data_type::DataType,
        schema::{SlotDescriptor, TupleDescriptor},
    };

    fn a() -> Expr {
        Expr::labeled_slot(1u32, "a", DataType::Int)
    }

    fn b() -> Expr {
        Expr::labeled_slot(2u32, "b", DataType::VarChar)
    }

    #[test]
    fn test_split_flattens_and_chain() {
        let first = Expr::equals(a(), Expr::literal(1));
        let second = Expr::equals(b(), Expr::literal("x"));
        let third = Expr::or(first.clone(), second.clone());
        let root = Expr::and(Expr::and(first.clone(), second.clone()), third.clone());

        assert_eq!(split_conjuncts(&root), vec![&first, &second, &third]);
    }

    #[test]
    fn test_split_keeps_non_and_root() {
        let root = Expr::negate(Expr::and(
            Expr::equals(a(), Expr::literal(1)),
            Expr::equals(a(), Expr::literal(2)),
        ));
        assert_eq!(split_conjuncts(&root), vec![&root]);
    }

    #[test]
    fn test_partition_keeps_input_positions() {
        let tuple = TupleDescriptor::new(
            0u32,
            vec![
                SlotDescriptor::new(1u32, "a", DataType::Int),
                SlotDescriptor::new(2u32, "b", DataType::VarChar),
            ],
        );
        let folder = ConstantFolder::new();
        let settings = PushdownSettings::default();
        let extractor = DisjunctExtractor::new(&tuple, &folder, &settings);

        let conjuncts = [
            Expr::equals(a(), Expr::literal(1)),
            Expr::is_null(b(), true),
            Expr::or(
                Expr::equals(b(), Expr::literal("x")),
                Expr::equals(b(), Expr::literal("y")),
            ),
            Expr::equals(a(), Expr::slot(2u32, DataType::VarChar)),
        ];

        let partition = partition_conjuncts(&conjuncts, &extractor);
        let pushed: Vec<_> = partition.pushed.iter().map(|p| p.index).collect();
        assert_eq!(pushed, vec![0, 2]);
        assert_eq!(partition.local, vec![1, 3]);
        assert_eq!(partition.pushed[1].disjuncts.len(), 2);
        assert!(!partition.is_fully_pushed());
    }

    #[test]
    fn test_partition_of_nothing() {
        let tuple = TupleDescriptor::default();
        let folder = ConstantFolder::new();
        let settings = PushdownSettings::default();
        let extractor = DisjunctExtractor::new(&tuple, &folder, &settings);

        let partition = partition_conjuncts(std::iter::empty(), &extractor);
        assert!(partition.pushed.is_empty());
        assert!(partition.is_fully_pushed());
    }
}
