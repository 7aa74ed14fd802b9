mod background;
mod button_fx;
mod clock;
mod config;
mod dom;
mod lifecycle;
mod loading;
mod motion;
mod ripple;
mod scheduler;
mod yew_app;

fn main() {
    yew::Renderer::<yew_app::App>::new().render();
}
