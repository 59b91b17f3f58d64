////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use gl_typed_generator::{Command, Fallbacks};

use crate::{EntryPoint, SymbolLoader};

/// Native symbol names tried, in order, to bind one command.
///
/// The command's own name comes first, then its aliases in the registry's preference order
/// (typically ARB, then EXT, then vendor variants).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackChain {
    names: Vec<String>,
}

impl FallbackChain {
    pub fn new<I, S>(primary: &str, aliases: I) -> FallbackChain
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = vec![primary.to_owned()];
        for alias in aliases {
            let alias = alias.into();
            if !names.contains(&alias) {
                names.push(alias);
            }
        }
        FallbackChain { names }
    }

    pub fn for_command(cmd: &Command, fallbacks: Fallbacks) -> FallbackChain {
        match fallbacks {
            Fallbacks::All => FallbackChain::new(&cmd.name, cmd.aliases.iter().map(String::as_str)),
            Fallbacks::None => FallbackChain::new(&cmd.name, Vec::<String>::new()),
        }
    }

    pub fn primary(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Binds the first name the loader resolves.
    pub fn resolve<L>(&self, loader: &L) -> Option<Binding>
    where L: SymbolLoader + ?Sized {
        self.names.iter().find_map(|name| {
            loader.resolve(name).map(|entry_point| Binding { entry_point, symbol: name.clone() })
        })
    }
}

/// A resolved entry point and the chain name that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub entry_point: EntryPoint,
    pub symbol: String,
}
