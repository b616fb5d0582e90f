//! Manifest builder
//!
//! Collects every `media` element found below a `manifest` element into a
//! flat list. Only outermost manifests are scanned so a media nested in two
//! manifests is reported once.

use crate::content::attributes::{collect_descendants, extract_tagged_attributes};
use crate::content::markup::{MarkupTree, NodeId};
use crate::content::taxonomy::{MANIFEST_TAG, MEDIA_TAG};
use crate::content::types::{Manifest, MediaEntry};

pub fn build_manifest(tree: &MarkupTree) -> Manifest {
    let mut medias = Vec::new();

    for manifest in tree.elements_by_tag_name(MANIFEST_TAG) {
        if tree.has_ancestor_named(manifest, MANIFEST_TAG) {
            log::warn!("Nested <{}> folded into its enclosing manifest", MANIFEST_TAG);
            continue;
        }
        medias.extend(
            tree.descendants(manifest)
                .into_iter()
                .filter(|id| tree.tag_name(*id) == Some(MEDIA_TAG))
                .map(|media| build_media(tree, media)),
        );
    }

    log::debug!("Manifest built: {} media entries", medias.len());
    Manifest { medias }
}

fn build_media(tree: &MarkupTree, media: NodeId) -> MediaEntry {
    MediaEntry {
        attributes: extract_tagged_attributes(tree, media, MEDIA_TAG),
        descendants: collect_descendants(tree, media),
    }
}
