mod breadcrumb_bar;
mod view;
