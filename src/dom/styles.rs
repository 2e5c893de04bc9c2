//! Default fade/rise animation for steam particles.
//! Injected once per page, and only when the page opted in via config.

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::PARTICLE_STYLES_ID;

fn particle_css(class: &str, animation_ms: u32) -> String {
    format!(
        "
.{class}{{position:absolute;pointer-events:none;user-select:none;opacity:0;animation:steam-rise {ms}ms ease-out forwards}}
@keyframes steam-rise{{0%{{opacity:0;transform:translateY(0) scale(.8)}}20%{{opacity:.7}}100%{{opacity:0;transform:translateY(-60px) scale(1.2)}}}}
",
        class = class,
        ms = animation_ms
    )
}

/// Append a `<style>` with the particle animation, or rewrite the existing one
/// when the class or duration changed.
pub fn ensure_particle_styles(document: &Document, class: &str, animation_ms: u32) -> Result<(), JsValue> {
    let css = particle_css(class, animation_ms);
    if let Some(existing) = document.get_element_by_id(PARTICLE_STYLES_ID) {
        if existing.text_content().as_deref() != Some(css.as_str()) {
            existing.set_text_content(Some(&css));
        }
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(PARTICLE_STYLES_ID);
    style.set_text_content(Some(&css));
    // Append to <head>
    if let Some(head) = document.query_selector("head")? {
        head.append_child(&style)?;
    } else if let Some(body) = document.body() {
        // fallback – append to body
        body.append_child(&style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_uses_class_and_duration() {
        let css = particle_css("steam-particle", 3000);
        assert!(css.contains(".steam-particle{"));
        assert!(css.contains("steam-rise 3000ms"));
        assert!(css.contains("@keyframes steam-rise{"));
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::super::*;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn styles_are_injected_once() {
            let document = web_sys::window().unwrap().document().unwrap();
            ensure_particle_styles(&document, "steam-particle", 3000).unwrap();
            ensure_particle_styles(&document, "steam-particle", 3000).unwrap();
            let styles = document.query_selector_all(&format!("#{}", PARTICLE_STYLES_ID)).unwrap();
            assert_eq!(styles.length(), 1);
        }

        #[wasm_bindgen_test]
        fn remount_with_other_class_rewrites_styles() {
            let document = web_sys::window().unwrap().document().unwrap();
            ensure_particle_styles(&document, "steam-particle", 3000).unwrap();
            ensure_particle_styles(&document, "vapor", 1500).unwrap();
            let styles = document.query_selector_all(&format!("#{}", PARTICLE_STYLES_ID)).unwrap();
            assert_eq!(styles.length(), 1);
            let css = document.get_element_by_id(PARTICLE_STYLES_ID).unwrap().text_content().unwrap();
            assert!(css.contains(".vapor{"));
            assert!(css.contains("steam-rise 1500ms"));
            assert!(!css.contains(".steam-particle{"));
        }
    }
}
