////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{collections::HashMap, ffi::c_void, mem, sync::Arc};

use gl_typed_generator::{Availability, Command, DebugPrints, ErrorChecks, Fallbacks, Registry};
use once_cell::sync::OnceCell;

use crate::{Binding, DispatchError, FallbackChain, PinTracker, SymbolLoader};

/// Dense index of a command inside a `DispatchTable`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

/// Commands and their fallback chains.
///
/// Built once per generation run and shared by every context; it holds no native state.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    chains: Vec<FallbackChain>,
    ids: HashMap<String, CommandId>,
}

impl DispatchTable {
    pub fn new<'a, I>(commands: I, fallbacks: Fallbacks) -> DispatchTable
    where I: IntoIterator<Item = &'a Command> {
        let mut table = DispatchTable::default();
        for cmd in commands {
            if table.ids.contains_key(&cmd.name) {
                continue;
            }
            table.ids.insert(cmd.name.clone(), CommandId(table.chains.len()));
            table.chains.push(FallbackChain::for_command(cmd, fallbacks));
        }
        table
    }

    /// Every command of the registry.
    pub fn for_registry(registry: &Registry, fallbacks: Fallbacks) -> DispatchTable {
        DispatchTable::new(registry.commands(), fallbacks)
    }

    /// The commands available in one configuration.
    pub fn for_availability(registry: &Registry, availability: &Availability, fallbacks: Fallbacks) -> DispatchTable {
        let commands = availability.commands().filter_map(|name| {
            let cmd = registry.command(name);
            if cmd.is_none() {
                debug!("{} is available but has no command record, not dispatching it", name);
            }
            cmd
        });
        DispatchTable::new(commands, fallbacks)
    }

    pub fn id(&self, name: &str) -> Option<CommandId> {
        self.ids.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = CommandId> {
        (0..self.chains.len()).map(CommandId)
    }

    /// `None` when `id` comes from another table.
    pub fn name(&self, id: CommandId) -> Option<&str> {
        self.chain(id).map(FallbackChain::primary)
    }

    pub fn chain(&self, id: CommandId) -> Option<&FallbackChain> {
        self.chains.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// A command bound to a live entry point.
#[derive(Copy, Clone, Debug)]
pub struct BoundCommand<'a> {
    command: &'a str,
    binding: &'a Binding,
}

impl<'a> BoundCommand<'a> {
    /// Registry name of the command.
    pub fn name(&self) -> &'a str {
        self.command
    }

    /// Native symbol that was actually bound; differs from `name` when an alias was used.
    pub fn entry_point(&self) -> &'a str {
        &self.binding.symbol
    }

    pub fn as_ptr(&self) -> *const c_void {
        self.binding.entry_point.as_ptr()
    }

    /// Reinterprets the entry point as a function pointer, e.g.
    /// `extern "system" fn(f32, f32, f32, f32)`.
    ///
    /// # Safety
    ///
    /// `F` must be a function pointer type matching the native signature of `entry_point()`.
    pub unsafe fn cast<F: Copy>(&self) -> F {
        assert_eq!(
            mem::size_of::<F>(),
            mem::size_of::<*const c_void>(),
            "{} can only be cast to a function pointer",
            self.command
        );
        mem::transmute_copy(&self.as_ptr())
    }
}

/// The dispatch slots of one native context.
///
/// Two contexts may bind different entry points for the same command (different drivers in one
/// process), so each owns its slots and its loader. Every slot is resolved at most once; concurrent
/// first uses of the same slot wait for a single resolution.
pub struct DispatchContext<L> {
    table: Arc<DispatchTable>,
    loader: L,
    slots: Vec<OnceCell<Option<Binding>>>,
    pins: PinTracker,
    debug_prints: DebugPrints,
    /// Set when errors are checked after each call.
    error_query: Option<CommandId>,
}

impl<L: SymbolLoader> DispatchContext<L> {
    /// Creates a context whose commands resolve lazily on first use.
    pub fn new(table: Arc<DispatchTable>, loader: L) -> DispatchContext<L> {
        let slots = table.ids().map(|_| OnceCell::new()).collect();
        DispatchContext {
            table,
            loader,
            slots,
            pins: PinTracker::new(),
            debug_prints: if cfg!(feature = "fn_calls_print") { DebugPrints::FunctionCalls } else { DebugPrints::None },
            error_query: None,
        }
    }

    /// Creates a context and resolves every command right away.
    /// ~~~ignore
    /// let gl = DispatchContext::load_with(table, |s| window.get_proc_address(s));
    /// ~~~
    pub fn load_with(table: Arc<DispatchTable>, loader: L) -> DispatchContext<L> {
        let context = DispatchContext::new(table, loader);
        let bound = context.load_all();
        debug!("{} of {} commands bound", bound, context.table.len());
        context
    }

    pub fn with_debug_prints(mut self, debug_prints: DebugPrints) -> DispatchContext<L> {
        self.debug_prints = debug_prints;
        self
    }

    /// Runs `query` (e.g. `glGetError`) after every `invoke`; a non-zero result becomes
    /// `DispatchError::NativeError`.
    pub fn with_error_checks(mut self, query: &str) -> Result<DispatchContext<L>, DispatchError> {
        let id = self.table.id(query).ok_or_else(|| DispatchError::UnknownCommand(query.to_owned()))?;
        self.error_query = Some(id);
        Ok(self)
    }

    pub fn error_checks(&self) -> ErrorChecks {
        match self.error_query {
            Some(_) => ErrorChecks::AfterEachCall,
            None => ErrorChecks::None,
        }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn pins(&self) -> &PinTracker {
        &self.pins
    }

    /// Resolves every slot, returning how many commands got bound.
    pub fn load_all(&self) -> usize {
        self.table.ids().filter(|&id| self.is_loaded(id)).count()
    }

    fn slot(&self, id: CommandId) -> Result<Option<&Binding>, DispatchError> {
        let (cell, chain) = match (self.slots.get(id.0), self.table.chain(id)) {
            (Some(cell), Some(chain)) => (cell, chain),
            _ => return Err(DispatchError::ForeignCommandId(id.0)),
        };

        let binding = cell.get_or_init(|| {
            let binding = chain.resolve(&self.loader);
            match &binding {
                Some(binding) => debug!("{} bound to {}", chain.primary(), binding.symbol),
                None => debug!("{} is unbound, tried {}", chain.primary(), chain.names().join(", ")),
            }
            binding
        });
        Ok(binding.as_ref())
    }

    pub fn is_loaded(&self, id: CommandId) -> bool {
        matches!(self.slot(id), Ok(Some(_)))
    }

    /// Native symbol bound for `id`, if any.
    pub fn entry_point(&self, id: CommandId) -> Option<&str> {
        self.slot(id).ok().flatten().map(|b| b.symbol.as_str())
    }

    /// `(command, bound entry point)` for every command of the table.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.table.ids().zip(&self.table.chains).map(move |(id, chain)| (chain.primary(), self.entry_point(id)))
    }

    pub fn command(&self, id: CommandId) -> Result<BoundCommand<'_>, DispatchError> {
        let chain = self.table.chain(id).ok_or(DispatchError::ForeignCommandId(id.0))?;
        match self.slot(id)? {
            Some(binding) => Ok(BoundCommand { command: chain.primary(), binding }),
            None => Err(DispatchError::NotImplemented { command: chain.primary().to_owned(), chain: chain.names().to_vec() }),
        }
    }

    pub fn command_by_name(&self, name: &str) -> Result<BoundCommand<'_>, DispatchError> {
        let id = self.table.id(name).ok_or_else(|| DispatchError::UnknownCommand(name.to_owned()))?;
        self.command(id)
    }

    /// Like `command`, but an unbound command, or an id from another table, is a panic.
    ///
    /// Calling a command the context does not implement is a caller bug, never a no-op.
    pub fn require(&self, id: CommandId) -> BoundCommand<'_> {
        match self.command(id) {
            Ok(cmd) => cmd,
            Err(err) => missing_fn_panic(&err),
        }
    }

    /// Calls `call` with the bound command, tracing the entry point used and checking for native
    /// errors afterwards when configured.
    ///
    /// Panics if `id` is unbound. An id from another table is an error.
    pub fn invoke<R, F>(&self, id: CommandId, call: F) -> Result<R, DispatchError>
    where F: FnOnce(&BoundCommand<'_>) -> R {
        let cmd = match self.command(id) {
            Ok(cmd) => cmd,
            Err(err @ DispatchError::ForeignCommandId(_)) => return Err(err),
            Err(err) => missing_fn_panic(&err),
        };

        if self.debug_prints == DebugPrints::FunctionCalls {
            if cmd.name() == cmd.entry_point() {
                trace!("{}", cmd.name());
            } else {
                trace!("{} via {}", cmd.name(), cmd.entry_point());
            }
        }

        let ret = call(&cmd);

        if self.error_checks() == ErrorChecks::AfterEachCall {
            self.check_errors(cmd.name())?;
        }
        Ok(ret)
    }

    /// Runs the error query, blaming `after` for a non-zero result.
    pub fn check_errors(&self, after: &str) -> Result<(), DispatchError> {
        let query = match self.error_query {
            Some(query) => self.command(query)?,
            None => return Ok(()),
        };

        let get_error = unsafe { query.cast::<extern "system" fn() -> u32>() };
        match get_error() {
            0 => Ok(()),
            code => Err(DispatchError::NativeError { command: after.to_owned(), code }),
        }
    }
}

#[inline(never)]
#[cold]
fn missing_fn_panic(err: &DispatchError) -> ! {
    panic!("{}", err)
}
