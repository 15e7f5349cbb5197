//! Abstract Syntax Tree types for the netlist format.

use crate::circuit::{Element, ElementKind, Schematic};

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    /// Element lines in file order
    pub components: Vec<ComponentDef>,
    /// Label given by a `.ground` directive
    pub ground: Option<String>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert into a schematic; element ids are assigned 1.. in file order.
    pub fn into_schematic(self) -> Schematic {
        let mut schematic = Schematic::new();
        schematic.ground = self.ground;
        for (i, def) in self.components.into_iter().enumerate() {
            let [a, b] = def.nodes;
            schematic.elements.push(Element {
                id: (i + 1) as u32,
                name: def.name,
                kind: def.component_type.into(),
                terminals: [a, b],
                value: def.value,
            });
        }
        schematic
    }
}

/// A component definition from the netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Component type (R, V)
    pub component_type: ComponentType,
    /// Unique component name
    pub name: String,
    /// Connected node labels, `[n1, n2]` or `[n+, n-]`
    pub nodes: [String; 2],
    /// Resistance or voltage
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Resistor
    Resistor,
    /// Independent voltage source
    VoltageSource,
}

impl ComponentType {
    /// Determine the component type from the first letter of its name.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(ComponentType::Resistor),
            'V' => Some(ComponentType::VoltageSource),
            _ => None,
        }
    }
}

impl From<ComponentType> for ElementKind {
    fn from(ct: ComponentType) -> Self {
        match ct {
            ComponentType::Resistor => ElementKind::Resistor,
            ComponentType::VoltageSource => ElementKind::VoltageSource,
        }
    }
}
