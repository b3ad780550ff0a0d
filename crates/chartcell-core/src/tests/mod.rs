mod extract;
mod rendering;
