use model::{
    core::schema::{SlotDescriptor, SlotLookup},
    execution::expr::Expr,
};

/// Find the schema slot a column reference points at.
///
/// Returns `None` when the node references no slot or none of its slot ids
/// exists in `schema`.
pub fn resolve_slot<'s, S>(column: &Expr, schema: &'s S) -> Option<&'s SlotDescriptor>
where
    S: SlotLookup + ?Sized,
{
    schema.find_any(&column.slot_ids())
}
