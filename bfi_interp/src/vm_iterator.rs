use crate::{vm::BrainfuckVM, vm_error::VMError};
use bfi_types::VMState;

// Facilitates step-by-step execution of a program, yielding the state after each step.
// This is particularly useful for debugging.
pub struct VMIterator<'v, 'a> {
    vm: &'v mut BrainfuckVM<'a>,
    done: bool,
}

impl<'v, 'a> VMIterator<'v, 'a> {
    pub fn new(vm: &'v mut BrainfuckVM<'a>) -> Self {
        VMIterator { vm, done: false }
    }

    pub fn vm(&self) -> &BrainfuckVM<'a> {
        &*self.vm
    }
}

// Iterate one step at a time. Iteration ends at the end of the program, or right
// after yielding the first error since nothing may run past a fault.
impl<'v, 'a> Iterator for VMIterator<'v, 'a> {
    type Item = Result<VMState, VMError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.vm.interpret_step() {
            Ok(Some(state)) => Some(Ok(state)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'v, 'a> std::iter::FusedIterator for VMIterator<'v, 'a> {}

impl<'a> BrainfuckVM<'a> {
    // Returns an iterator that allows stepping through the program execution
    pub fn iter(&mut self) -> VMIterator<'_, 'a> {
        VMIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::vm_builder::VMBuilder;
    use crate::vm_error::VMError;
    use bfi_test_utils::NullWriter;
    use bfi_types::RawInstruction;
    use std::io::Cursor;
    use std::num::NonZeroUsize;

    #[test]
    fn test_iterates_every_instruction() -> Result<(), VMError> {
        let mut vm = VMBuilder::new()
            .set_program_reader(Cursor::new("+ + comment +"))
            .set_output(NullWriter)
            .build()?;
        let states = vm.iter().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(states.len(), 3);
        assert!(states
            .iter()
            .all(|state| state.raw_instruction() == Some(RawInstruction::IncrementByte)));
        assert_eq!(states[2].cell_value(), 3);
        Ok(())
    }

    #[test]
    fn test_stops_after_first_error() -> Result<(), VMError> {
        let mut vm = VMBuilder::new()
            .set_program_reader(Cursor::new("+>>+"))
            .set_cell_count(NonZeroUsize::new(2))
            .set_output(NullWriter)
            .build()?;
        let mut iter = vm.iter();
        assert!(matches!(iter.next(), Some(Ok(_))));
        assert!(matches!(iter.next(), Some(Ok(_))));
        assert!(matches!(iter.next(), Some(Err(VMError::MemoryOverflow { .. }))));
        assert!(iter.next().is_none());
        assert_eq!(iter.vm().tape(), &[1, 0]);
        Ok(())
    }
}
