//! `<picture>` element rendering.
//!
//! A thin template over [`Descriptor`] using [maud](https://maud.lambda.xyz/):
//! compile-time checked, auto-escaped, no runtime template files. Hosts with
//! their own template layer can ignore this module and consume the
//! descriptor directly; it exists so the common case is one call.
//!
//! Lazy mode mirrors the data-attribute convention many lazy-loading
//! libraries use: `srcset` moves to `data-srcset`, the `<picture>` gets a
//! `data-lazyload` marker, and the `<img>` gets `loading="lazy"`. The
//! placeholder data URI is always the `<img>` `src`, so something paints
//! before any real variant loads.

use crate::descriptor::Descriptor;
use crate::options::EffectiveOptions;
use maud::{Markup, html};

/// Render a complete `<picture>` element for a descriptor.
pub fn picture(descriptor: &Descriptor, options: &EffectiveOptions) -> Markup {
    html! {
        picture data-lazyload[options.lazy] {
            @for source in &descriptor.sources {
                @if options.lazy {
                    source type=(source.mime) data-srcset=(source.srcset) sizes=(options.sizes);
                } @else {
                    source type=(source.mime) srcset=(source.srcset) sizes=(options.sizes);
                }
            }
            img loading=[options.lazy.then_some("lazy")]
                width=(descriptor.width)
                height=(descriptor.height)
                src=(descriptor.placeholder)
                alt=(descriptor.alt);
        }
    }
}
