mod test_progressive_render;
