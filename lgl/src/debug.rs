use gl_loader::{DispatchContext, SymbolLoader};
use gl_typed_generator::{Availability, Provenance};

pub fn report_availability(available: &Availability) {
    let target = available.target();
    info!(
        "{} {}: {} enumerants, {} commands",
        target.api,
        target.version,
        available.enumerants().count(),
        available.commands().count()
    );

    for name in available.names() {
        match available.provenance(name) {
            Some(Provenance::Feature { name: feature, .. }) => debug!("{} from {}", name, feature),
            Some(Provenance::Extension(extension)) => debug!("{} from extension {}", name, extension),
            None => (),
        }
    }
}

/// Logs which native symbol every command bound to; aliases and misses stand out.
pub fn report_bindings<L: SymbolLoader>(gl: &DispatchContext<L>) {
    for (command, entry_point) in gl.bindings() {
        match entry_point {
            Some(symbol) if symbol != command => info!("{} bound through {}", command, symbol),
            Some(_) => debug!("{} bound", command),
            None => warn!("{} (and other aliases) are not implemented by this driver", command),
        }
    }
}
