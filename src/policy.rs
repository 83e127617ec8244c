use crate::catalog::FlavorAsset;

/// Only the source upload is ever removed.
pub fn is_deletion_candidate(flavor: &FlavorAsset) -> bool {
    flavor.is_original
}

/// An entity with a single flavor has no redundant copy to remove.
pub fn has_redundant_variants(flavors: &[FlavorAsset]) -> bool {
    flavors.len() > 1
}
