mod hotkey;
mod menu;
mod tray_icon;
