use serde::Serialize;

/// Identity of a source AST node, used to key checker facts.
///
/// Ids are dense `u32` indexes assigned by the frontend. The reserved value
/// `NodeId::SYNTHETIC` marks nodes manufactured during lowering (such as the
/// receiver keyword inserted by adapter wrapping); the checker has no facts
/// for synthetic nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id of nodes synthesized during lowering, absent from checker tables.
    pub const SYNTHETIC: NodeId = NodeId(u32::MAX);

    /// Whether this node was manufactured during lowering.
    pub fn is_synthetic(&self) -> bool {
        *self == Self::SYNTHETIC
    }
}

/// Identity of a resolved binding (variable, parameter, function).
///
/// The reserved value `SymbolId::TEMP` marks identifiers generated by the
/// compiler itself. Generated temps are bound exactly once and never
/// reassigned, so lowering may treat them as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Symbol of compiler-generated temporaries.
    pub const TEMP: SymbolId = SymbolId(u32::MAX);

    /// Whether this symbol names a compiler-generated temporary.
    pub fn is_temp(&self) -> bool {
        *self == Self::TEMP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_node_id() {
        assert!(NodeId::SYNTHETIC.is_synthetic());
        assert!(!NodeId(0).is_synthetic());
    }

    #[test]
    fn temp_symbol_id() {
        assert!(SymbolId::TEMP.is_temp());
        assert!(!SymbolId(7).is_temp());
    }
}
