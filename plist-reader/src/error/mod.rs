/*!
 This module contains types that represent the errors this library can emit.
*/

pub mod plist;
