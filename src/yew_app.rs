use std::rc::Rc;

use js_sys::{Date, Math};
use web_sys::{
    DragEvent, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent,
    MouseEvent,
};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::clipboard;
use blockkit_builder_core::{
    block_count_label, display_name, fields_for, panel_title, preview_for, Block, BlockContent,
    BlockId, BlockPreview, EditorAction, EditorState, FieldControl, PaletteEntry,
    PropertyField, PALETTE,
};

pub(crate) const ROOT_ELEMENT_ID: &str = "root";

const DRAG_BLOCK_TYPE_KEY: &str = "blockType";
const DRAG_BLOCK_INDEX_KEY: &str = "blockIndex";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn session_salt() -> u64 {
    let now = Date::now().max(0.0) as u64;
    let noise = (Math::random() * 1000.0) as u64;
    now.wrapping_mul(1000).wrapping_add(noise)
}

fn set_drag_payload(event: &DragEvent, key: &str, value: &str) {
    if let Some(transfer) = event.data_transfer() {
        let _ = transfer.set_data(key, value);
        transfer.set_effect_allowed("move");
    }
}

fn dispatch_cb<E: 'static>(core: &Rc<AppCore>, action: EditorAction) -> Callback<E> {
    let core = core.clone();
    Callback::from(move |_: E| core.dispatch(action.clone()))
}

fn palette_item(core: &Rc<AppCore>, entry: &'static PaletteEntry) -> Html {
    let kind = entry.kind;
    let on_drag_start = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            set_drag_payload(&event, DRAG_BLOCK_TYPE_KEY, kind.as_str());
            core.dispatch(EditorAction::BeginPaletteDrag(kind));
        })
    };
    html! {
        <div
            key={kind.as_str()}
            class="palette-item"
            data-kind={kind.as_str()}
            draggable="true"
            ondragstart={on_drag_start}
            ondragend={dispatch_cb::<DragEvent>(core, EditorAction::CancelDrag)}
            onclick={dispatch_cb::<MouseEvent>(core, EditorAction::AddBlock(kind))}
        >
            <div class="palette-item-title">
                <span class="palette-icon">{ entry.icon }</span>
                <span class="palette-name">{ entry.name }</span>
            </div>
            <p class="palette-description">{ entry.description }</p>
        </div>
    }
}

fn palette_view(core: &Rc<AppCore>) -> Html {
    html! {
        <aside class="palette">
            <h2>{ "Block Types" }</h2>
            <div class="palette-list">
                { for PALETTE.iter().map(|entry| palette_item(core, entry)) }
            </div>
        </aside>
    }
}

fn block_preview(content: &BlockContent) -> Html {
    match preview_for(content) {
        BlockPreview::Section { body } => html! {
            <div class="preview preview-section">
                <div class="preview-text">{ body }</div>
            </div>
        },
        BlockPreview::Image { title, caption } => html! {
            <div class="preview preview-image">
                <div class="preview-image-title">{ title }</div>
                <div class="preview-image-frame">
                    <span>{ caption }</span>
                </div>
            </div>
        },
        BlockPreview::Divider => html! {
            <div class="preview preview-divider">
                <hr />
            </div>
        },
    }
}

fn drop_indicator() -> Html {
    html! { <div class="drop-indicator"></div> }
}

fn block_card(core: &Rc<AppCore>, state: &EditorState, index: usize, block: &Block) -> Html {
    let len = state.blocks().len();
    let selected = state.selected_id() == Some(&block.id);
    let on_drag_start = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            set_drag_payload(&event, DRAG_BLOCK_INDEX_KEY, &index.to_string());
            core.dispatch(EditorAction::BeginBlockDrag(index));
        })
    };
    let on_drag_over = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            core.dispatch(EditorAction::DragOver(index));
        })
    };
    let on_drop = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            core.dispatch(EditorAction::Drop);
        })
    };
    let on_remove = {
        let core = core.clone();
        let id = block.id.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            core.dispatch(EditorAction::DeleteBlock(id.clone()));
        })
    };
    let move_button = |label: &'static str, title: &'static str, to: Option<usize>| {
        let core = core.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            if let Some(to) = to {
                core.dispatch(EditorAction::MoveBlock { from: index, to });
            }
        });
        html! {
            <button class="block-move" title={title} disabled={to.is_none()} {onclick}>
                { label }
            </button>
        }
    };
    let up_to = index.checked_sub(1);
    let down_to = (index + 1 < len).then_some(index + 1);
    html! {
        <div key={block.id.to_string()} class="block-slot">
            { if state.drop_target() == Some(index) { drop_indicator() } else { html! {} } }
            <div
                class={classes!("block-card", selected.then_some("selected"))}
                data-kind={block.kind().as_str()}
                draggable="true"
                onclick={dispatch_cb::<MouseEvent>(core, EditorAction::Select(Some(block.id.clone())))}
                ondragstart={on_drag_start}
                ondragover={on_drag_over}
                ondrop={on_drop}
                ondragend={dispatch_cb::<DragEvent>(core, EditorAction::CancelDrag)}
            >
                <div class="block-card-header">
                    <div class="block-card-title">
                        <span class="drag-handle">{ "⋮⋮" }</span>
                        <span class="block-name">{ display_name(block.kind()) }</span>
                    </div>
                    <div class="block-card-actions">
                        { move_button("↑", "Move up", up_to) }
                        { move_button("↓", "Move down", down_to) }
                        <button class="block-remove" onclick={on_remove}>{ "Remove" }</button>
                    </div>
                </div>
                { block_preview(&block.content) }
            </div>
        </div>
    }
}

fn canvas_view(core: &Rc<AppCore>, state: &EditorState) -> Html {
    let len = state.blocks().len();
    let on_canvas_drag_over = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            core.dispatch(EditorAction::DragOverCanvas);
        })
    };
    let on_canvas_drop = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            core.dispatch(EditorAction::DropOnCanvas);
        })
    };
    let on_end_drag_over = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            core.dispatch(EditorAction::DragOver(len));
        })
    };
    let on_end_drop = {
        let core = core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            core.dispatch(EditorAction::Drop);
        })
    };
    let body = if state.blocks().is_empty() {
        html! {
            <div class="canvas-empty">
                { "Drag blocks here or click on a block type to add" }
            </div>
        }
    } else {
        html! {
            <div class="canvas-blocks">
                { for state
                    .blocks()
                    .iter()
                    .enumerate()
                    .map(|(index, block)| block_card(core, state, index, block)) }
                <div class="canvas-drop-end" ondragover={on_end_drag_over} ondrop={on_end_drop}>
                    { if state.drop_target() == Some(len) { drop_indicator() } else { html! {} } }
                </div>
            </div>
        }
    };
    html! {
        <section class="canvas" ondragover={on_canvas_drag_over} ondrop={on_canvas_drop}>
            <div class="canvas-sheet">
                <h2>{ "Block Canvas" }</h2>
                { body }
            </div>
        </section>
    }
}

fn property_field(core: &Rc<AppCore>, id: &BlockId, field: PropertyField) -> Html {
    let key = field.key;
    let on_value = {
        let core = core.clone();
        let id = id.clone();
        Callback::from(move |raw: String| {
            if let Some(patch) = key.patch(raw) {
                core.dispatch(EditorAction::UpdateBlock {
                    id: id.clone(),
                    patch,
                });
            }
        })
    };
    let control = match field.control {
        FieldControl::TextArea { rows } => {
            let oninput = Callback::from(move |event: InputEvent| {
                let input: HtmlTextAreaElement = event.target_unchecked_into();
                on_value.emit(input.value());
            });
            html! {
                <textarea id={key.dom_id()} rows={rows.to_string()} value={field.value} {oninput} />
            }
        }
        FieldControl::TextInput => {
            let oninput = Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                on_value.emit(input.value());
            });
            html! {
                <input id={key.dom_id()} type="text" value={field.value} {oninput} />
            }
        }
        FieldControl::Select { options } => {
            let onchange = Callback::from(move |event: Event| {
                let select: HtmlSelectElement = event.target_unchecked_into();
                on_value.emit(select.value());
            });
            html! {
                <select id={key.dom_id()} value={field.value.clone()} {onchange}>
                    { for options.iter().map(|option| html! {
                        <option value={option.as_str()} selected={option.as_str() == field.value}>
                            { option.label() }
                        </option>
                    }) }
                </select>
            }
        }
    };
    html! {
        <div class="property">
            <label for={key.dom_id()}>{ field.label }</label>
            { control }
        </div>
    }
}

fn properties_view(core: &Rc<AppCore>, state: &EditorState) -> Html {
    let body = match state.selected_block() {
        None => html! {
            <p class="properties-empty">{ "Select a block to edit its properties" }</p>
        },
        Some(block) => {
            let fields = fields_for(&block.content);
            let body = if fields.is_empty() {
                html! { <p class="properties-empty">{ "Dividers have no editable properties" }</p> }
            } else {
                html! {
                    <>
                        { for fields.into_iter().map(|field| property_field(core, &block.id, field)) }
                    </>
                }
            };
            html! {
                <div class="properties-body">
                    <h3>{ panel_title(&block.content) }</h3>
                    { body }
                </div>
            }
        }
    };
    html! {
        <aside class="properties">
            <div class="properties-header">
                <h2>{ "Properties" }</h2>
            </div>
            { body }
        </aside>
    }
}

fn footer_view(core: &Rc<AppCore>, state: &EditorState) -> Html {
    let on_generate = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| core.generate_json())
    };
    let on_copy = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(text) = core.copy_text() {
                clipboard::copy_with_ack(text);
            }
        })
    };
    html! {
        <footer class="footer">
            <span class="block-count">{ block_count_label(state.blocks().len()) }</span>
            <div class="footer-actions">
                <button class="generate-json" onclick={on_generate}>{ "Generate JSON" }</button>
                <button
                    class="copy-json"
                    disabled={state.copy_text().is_none()}
                    onclick={on_copy}
                >
                    { "Copy JSON" }
                </button>
            </div>
        </footer>
    }
}

fn json_panel(state: &EditorState) -> Html {
    match state.copy_text() {
        Some(text) => html! {
            <div class="json-output">
                <pre>{ text }</pre>
            </div>
        },
        None => html! {},
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let app_snapshot = use_state(|| app_core.snapshot());
    {
        let app_core = app_core.clone();
        let app_snapshot = app_snapshot.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                app_snapshot.set(app_core_for_cb.snapshot());
            }));
            move || drop(subscription)
        });
    }
    let state = (*app_snapshot).clone();

    html! {
        <div class="builder">
            <header class="builder-header">
                <h1>{ "Slack Block Kit Builder" }</h1>
            </header>
            <div class="builder-main">
                { palette_view(&app_core) }
                <div class="builder-workspace">
                    { canvas_view(&app_core, &state) }
                    { properties_view(&app_core, &state) }
                </div>
            </div>
            { footer_view(&app_core, &state) }
            { json_panel(&state) }
        </div>
    }
}

pub(crate) fn run() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        gloo::console::error!("no document available");
        return;
    };
    let Some(root) = document.get_element_by_id(ROOT_ELEMENT_ID) else {
        gloo::console::error!(format!(
            "failed to find the #{ROOT_ELEMENT_ID} element; add <div id=\"{ROOT_ELEMENT_ID}\"></div> to index.html"
        ));
        return;
    };
    let core = AppCore::new(session_salt());
    let _app_handle = yew::Renderer::<App>::with_root_and_props(root, AppProps { core }).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockkit_builder_core::BlockKind;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(test_id: &str) -> (Rc<AppCore>, Element) {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(test_id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let core = AppCore::new(7);
        let _app_handle = yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps { core: core.clone() },
        )
        .render();
        (core, root)
    }

    async fn settle() {
        TimeoutFuture::new(0).await;
        TimeoutFuture::new(0).await;
    }

    fn query(root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector)
            .map(|list| list.length())
            .unwrap_or(0)
    }

    fn click(root: &Element, selector: &str) {
        query(root, selector)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .expect("clickable element")
            .click();
    }

    fn texts(root: &Element, selector: &str) -> Vec<String> {
        let Ok(list) = root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.text_content())
            .collect()
    }

    fn text(root: &Element, selector: &str) -> String {
        query(root, selector)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test(async)]
    async fn palette_click_adds_selected_section() {
        set_panic_hook();
        let (core, root) = mount("test-palette-click");
        settle().await;
        assert_eq!(count(&root, ".palette-item"), PALETTE.len() as u32);
        assert_eq!(text(&root, ".block-count"), "0 blocks");

        click(&root, ".palette-item[data-kind=\"section\"]");
        settle().await;

        assert_eq!(count(&root, ".block-card"), 1);
        assert_eq!(count(&root, ".block-card.selected"), 1);
        assert_eq!(text(&root, ".block-count"), "1 block");
        assert_eq!(text(&root, ".properties-body h3"), "Section Properties");
        let snapshot = core.snapshot();
        assert_eq!(
            snapshot.selected_id(),
            Some(&snapshot.blocks().as_slice()[0].id)
        );
    }

    #[wasm_bindgen_test(async)]
    async fn copy_is_disabled_until_generated() {
        set_panic_hook();
        let (_core, root) = mount("test-generate");
        settle().await;
        click(&root, ".palette-item[data-kind=\"divider\"]");
        settle().await;

        let copy_disabled = |root: &Element| {
            query(root, ".copy-json")
                .map(|button| button.has_attribute("disabled"))
                .unwrap_or(false)
        };
        assert!(copy_disabled(&root));
        assert!(query(&root, ".json-output").is_none());

        click(&root, ".generate-json");
        settle().await;

        assert!(!copy_disabled(&root));
        let json = text(&root, ".json-output pre");
        assert!(json.contains("\"type\": \"divider\""));
        assert!(!json.contains("block-"));
        assert_eq!(text(&root, ".properties-empty"), "Dividers have no editable properties");
    }

    #[wasm_bindgen_test(async)]
    async fn remove_clears_properties_panel() {
        set_panic_hook();
        let (_core, root) = mount("test-remove");
        settle().await;
        click(&root, ".palette-item[data-kind=\"image\"]");
        settle().await;
        assert_eq!(count(&root, ".property"), 3);

        click(&root, ".block-remove");
        settle().await;

        assert_eq!(count(&root, ".block-card"), 0);
        assert_eq!(
            text(&root, ".properties-empty"),
            "Select a block to edit its properties"
        );
    }

    #[wasm_bindgen_test(async)]
    async fn drag_state_shows_drop_indicator() {
        set_panic_hook();
        let (core, root) = mount("test-drag");
        settle().await;
        core.dispatch(EditorAction::AddBlock(BlockKind::Divider));
        core.dispatch(EditorAction::AddBlock(BlockKind::Image));
        core.dispatch(EditorAction::BeginBlockDrag(0));
        core.dispatch(EditorAction::DragOver(2));
        settle().await;
        assert_eq!(count(&root, ".canvas-drop-end .drop-indicator"), 1);

        core.dispatch(EditorAction::Drop);
        settle().await;
        assert_eq!(count(&root, ".drop-indicator"), 0);
        let kinds: Vec<String> = core
            .snapshot()
            .blocks()
            .iter()
            .map(|block| block.kind().as_str().to_string())
            .collect();
        assert_eq!(kinds, vec!["image", "divider"]);
        assert_eq!(texts(&root, ".block-name"), vec!["Image", "Divider"]);
    }

    #[wasm_bindgen_test(async)]
    async fn move_buttons_reorder() {
        set_panic_hook();
        let (core, root) = mount("test-move");
        settle().await;
        core.dispatch(EditorAction::AddBlock(BlockKind::Section));
        core.dispatch(EditorAction::AddBlock(BlockKind::Divider));
        settle().await;
        let second_up = root
            .query_selector_all(".block-move[title=\"Move up\"]")
            .ok()
            .and_then(|list| list.item(1))
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            .expect("second move-up button");
        second_up.click();
        settle().await;
        assert_eq!(
            core.snapshot().blocks().as_slice()[0].kind(),
            BlockKind::Divider
        );
    }
}
