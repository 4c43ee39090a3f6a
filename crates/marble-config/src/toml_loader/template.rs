//! Default TOML config template with inline documentation comments.

/// The default TOML config content with comments.
pub fn default_config_toml() -> &'static str {
    r##"# Marble Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[render]
# roughness = 0.1        # 0.0-1.0
# iterations = 48        # 1-512, raymarch steps (recompiles the shader)
# depth = 0.6            # 0.0-4.0, march distance in sphere radii
# smoothing = 0.2        # 0.0-1.0, 0 gives a hard binary threshold
# displacement = 0.1     # 0.0-1.0
# speed = 0.05           # displacement scroll rate
# color_a = "#000000"    # color at zero occupancy
# color_b = "#00ffaa"    # color at full occupancy

[assets]
# height_map = "assets/height_map.jpeg"
# displacement_map = "assets/displacement_map.jpeg"
# environment = "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/empty_warehouse_01_1k.hdr"
# request_timeout_secs = 30

[window]
# title = "Marble"
# width = 200
# height = 200
# transparent = true
# mount = "window"       # or "png:/path/to/capture.png"

[camera]
# fov_degrees = 75.0
# distance = 2.0
# near = 0.1
# far = 1000.0
# enable_damping = true
# damping_factor = 0.05
# auto_rotate = true
# auto_rotate_speed = 2.0
# rotate_speed = 1.0

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
}
