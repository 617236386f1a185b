pub mod gst;
