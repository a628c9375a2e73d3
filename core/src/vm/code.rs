use core::fmt;

use crate::vm::Instruction;

/// An executable instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub instructions: Vec<Instruction>,
    /// Deepest operand stack reached by a straight-line pass over the
    /// instructions. Used only to size the VM stack up front.
    pub max_stack_size: usize,
}

impl Code {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let mut depth: usize = 0;
        let mut max_stack_size = 0;
        for instruction in &instructions {
            let (pops, pushes) = instruction.stack_effect();
            depth = depth.saturating_sub(pops) + pushes;
            max_stack_size = max_stack_size.max(depth);
        }
        Self {
            instructions,
            max_stack_size,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl From<Vec<Instruction>> for Code {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

// Listing with one instruction per line. Labels are outdented and jump
// lines show the target index.
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: hashbrown::HashMap<&str, usize> = self
            .instructions
            .iter()
            .enumerate()
            .filter_map(|(addr, instr)| match instr {
                Instruction::Label(label) => Some((label.as_str(), addr)),
                _ => None,
            })
            .collect();

        for (addr, instr) in self.instructions.iter().enumerate() {
            match instr {
                Instruction::Label(label) => writeln!(f, "{:4}  {}:", addr, label)?,
                _ => match instr.jump_target() {
                    Some(label) => match targets.get(label.as_str()) {
                        Some(target) => writeln!(f, "{:4}      {} (to @{})", addr, instr, target)?,
                        None => writeln!(f, "{:4}      {} (unresolved)", addr, instr)?,
                    },
                    None => writeln!(f, "{:4}      {}", addr, instr)?,
                },
            }
        }
        Ok(())
    }
}
