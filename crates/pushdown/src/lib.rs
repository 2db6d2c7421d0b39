pub mod conjunct;
pub mod error;
pub mod filter;
pub mod predicate;
pub mod settings;

pub use conjunct::{ConjunctPartition, PushedConjunct, partition_conjuncts, split_conjuncts};
pub use error::UnsupportedShape;
pub use filter::{compiler::FilterCompiler, disjunct::DisjunctExtractor};
pub use predicate::{DisjunctList, ExtColumnDesc, ExternalPredicate, literal::ExtLiteral};
pub use settings::{OperandOrder, PushdownSettings};
