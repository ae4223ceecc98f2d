/*!

The network seen by the routings: nodes, the channels between them, the load in those channels, and the candidate paths between two nodes.

Routings only read through the `Network` and `Occupancy` traits. The simulation driver owns the concrete network (for example a `NeighboursLists`) and the `ChannelLoads`, and mutates the loads between decisions.

*/

pub mod neighbourslists;
pub mod load;

use std::fmt::Debug;

use crate::config::ConfigurationValue;
use crate::error::Error;
use crate::source_location;
use crate::topology::new_shape;
use crate::Plugs;
use self::neighbourslists::NeighboursLists;

pub use self::load::ChannelLoads;

///Index of a channel in its network.
pub type ChannelIndex = usize;

///An undirected link between two nodes.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Channel
{
	pub endpoints: [usize;2],
}

impl Channel
{
	pub fn new(a:usize, b:usize) -> Channel
	{
		Channel{
			endpoints: [a,b],
		}
	}
	///The endpoint that is not `from`, or `None` when `from` is not an endpoint.
	pub fn far_endpoint(&self, from:usize) -> Option<usize>
	{
		match self.endpoints
		{
			[a,b] if a==from => Some(b),
			[a,b] if b==from => Some(a),
			_ => None,
		}
	}
}

///How a network enumerates the candidate paths between two nodes.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum PathPolicy
{
	///Every path of minimum length.
	Shortest,
	///Every path not repeating nodes, optionally limited to `max_length` channels.
	///The number of simple paths grows exponentially with the size of the network, so without a limit this is only usable on small rings and stars.
	///When read from a configuration the limit is mandatory.
	Simple{
		max_length: Option<usize>,
	},
}

impl Default for PathPolicy
{
	fn default() -> PathPolicy
	{
		PathPolicy::Shortest
	}
}

///Read `Shortest` or `Simple { max_length: 6 }`. The `max_length` of `Simple` must be given.
pub fn new_path_policy(cv:&ConfigurationValue) -> Result<PathPolicy,Error>
{
	let (cv_name,cv_pairs)=cv.as_object()?;
	match cv_name
	{
		"Shortest" =>
		{
			if !cv_pairs.is_empty()
			{
				return Err(Error::ill_formed_configuration(source_location!(),cv.clone()).with_message("Shortest takes no fields".to_string()));
			}
			Ok(PathPolicy::Shortest)
		},
		"Simple" =>
		{
			let mut max_length=None;
			for (name,value) in cv_pairs.iter()
			{
				match name.as_str()
				{
					"max_length" => max_length=Some(value.as_usize()?),
					_ => return Err(Error::ill_formed_configuration(source_location!(),cv.clone()).with_message(format!("Nothing to do with field {} in Simple",name))),
				}
			}
			if max_length.is_none()
			{
				return Err(Error::ill_formed_configuration(source_location!(),cv.clone()).with_message("There were no max_length in Simple".to_string()));
			}
			Ok(PathPolicy::Simple{max_length})
		},
		_ => Err(Error::ill_formed_configuration(source_location!(),cv.clone()).with_message(format!("Unknown path policy {}",cv_name))),
	}
}

///A network as needed to take routing decisions. Addresses are node indices in `[0,num_nodes())`.
pub trait Network : Debug
{
	fn num_nodes(&self) -> usize;
	fn num_channels(&self) -> usize;
	///The channels having `address` as an endpoint.
	fn channels_at(&self, address:usize) -> Result<&[ChannelIndex],Error>;
	fn channel(&self, index:ChannelIndex) -> Result<&Channel,Error>;
	///All candidate paths from `source` to `destination`, as sequences of channels. Which paths are candidates is up to the network.
	///There is at least one path, or an error. When `source==destination` the only path is the empty one.
	fn enumerate_paths(&self, source:usize, destination:usize) -> Result<Vec<Vec<ChannelIndex>>,Error>;

	fn check_address(&self, address:usize) -> Result<(),Error>
	{
		let n=self.num_nodes();
		if address<n { Ok(()) } else { Err(Error::unknown_address(source_location!(),address,n)) }
	}
	///The other endpoint of `channel`, seen from `from`.
	fn far_endpoint(&self, channel:ChannelIndex, from:usize) -> Result<usize,Error>
	{
		self.channel(channel)?.far_endpoint(from).ok_or_else(||Error::channel_not_incident(source_location!(),channel,from))
	}
	///Number of channels at `address`.
	fn degree(&self, address:usize) -> Result<usize,Error>
	{
		Ok(self.channels_at(address)?.len())
	}
	///Whether `address` is directly connected to every other node.
	fn is_hub(&self, address:usize) -> Result<bool,Error>
	{
		Ok(self.degree(address)?+1==self.num_nodes())
	}
	///The channel joining `a` and `b`, if any.
	fn channel_between(&self, a:usize, b:usize) -> Result<Option<ChannelIndex>,Error>
	{
		self.check_address(b)?;
		for &channel in self.channels_at(a)?
		{
			if self.far_endpoint(channel,a)?==b
			{
				return Ok(Some(channel));
			}
		}
		Ok(None)
	}
}

///Read access to the current load of each channel.
pub trait Occupancy
{
	///Number of packets currently using or waiting for `channel`.
	fn occupancy(&self, channel:ChannelIndex) -> usize;
}

///Synthetic loads indexed by channel. Channels beyond the end of the vector are idle.
impl Occupancy for Vec<usize>
{
	fn occupancy(&self, channel:ChannelIndex) -> usize
	{
		self.get(channel).copied().unwrap_or(0)
	}
}

///The argument of a builder function for `Network`s.
#[non_exhaustive]
#[derive(Debug)]
pub struct NetworkBuilderArgument<'a>
{
	///A ConfigurationValue::Object defining the topology.
	pub cv: &'a ConfigurationValue,
	///The user defined plugs. In case the network needs to create elements.
	pub plugs: &'a Plugs,
}

impl<'a> NetworkBuilderArgument<'a>
{
	pub fn new(cv:&'a ConfigurationValue, plugs:&'a Plugs) -> NetworkBuilderArgument<'a>
	{
		NetworkBuilderArgument{
			cv,
			plugs,
		}
	}
}

///Build a network from a topology description such as `Torus { sides: [4,4], paths: Simple { max_length: 8 } }`.
pub fn new_network(arg:NetworkBuilderArgument) -> Result<Box<dyn Network>,Error>
{
	let cv=arg.cv;
	let (cv_name,cv_pairs)=cv.as_object()?;
	if let Some(builder) = arg.plugs.networks.get(cv_name)
	{
		return builder(arg);
	}
	let shape=new_shape(cv)?;
	let mut path_policy=PathPolicy::default();
	for (name,value) in cv_pairs.iter()
	{
		if name=="paths"
		{
			path_policy=new_path_policy(value)?;
		}
	}
	Ok(Box::new(NeighboursLists::from_shape(&shape)?.with_path_policy(path_policy)))
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn far_endpoint_of_channel()
	{
		let channel=Channel::new(3,7);
		assert_eq!(channel.far_endpoint(3),Some(7));
		assert_eq!(channel.far_endpoint(7),Some(3));
		assert_eq!(channel.far_endpoint(5),None);
	}

	#[test]
	fn synthetic_occupancy_defaults_to_idle()
	{
		let loads:Vec<usize>=vec![2,0,5];
		assert_eq!(loads.occupancy(2),5);
		assert_eq!(loads.occupancy(9),0);
	}

	#[test]
	fn path_policy_from_configuration()
	{
		let shortest=ConfigurationValue::object("Shortest",vec![]);
		assert_eq!(new_path_policy(&shortest).unwrap(),PathPolicy::Shortest);
		let simple=ConfigurationValue::object("Simple",vec![("max_length",ConfigurationValue::number(6))]);
		assert_eq!(new_path_policy(&simple).unwrap(),PathPolicy::Simple{max_length:Some(6)});
		let unbounded=ConfigurationValue::object("Simple",vec![]);
		assert!(matches!(new_path_policy(&unbounded).unwrap_err().kind,ErrorKind::IllFormedConfiguration{..}));
		let bogus=ConfigurationValue::object("Longest",vec![]);
		assert!(matches!(new_path_policy(&bogus).unwrap_err().kind,ErrorKind::IllFormedConfiguration{..}));
	}

	#[test]
	fn network_from_configuration()
	{
		let plugs=Plugs::default();
		let cv=ConfigurationValue::object("Torus",vec![
			("sides",ConfigurationValue::Array(vec![ConfigurationValue::number(4),ConfigurationValue::number(3)])),
			("paths",ConfigurationValue::object("Simple",vec![("max_length",ConfigurationValue::number(5))])),
		]);
		let network=new_network(NetworkBuilderArgument{cv:&cv,plugs:&plugs}).unwrap();
		assert_eq!(network.num_nodes(),12);
		assert_eq!(network.num_channels(),24);
		for node in 0..12
		{
			assert_eq!(network.degree(node).unwrap(),4);
		}
		let cv=ConfigurationValue::object("Hypercube",vec![]);
		assert!(matches!(new_network(NetworkBuilderArgument{cv:&cv,plugs:&plugs}).unwrap_err().kind,ErrorKind::UnknownTopology{..}));
	}

	#[test]
	fn hubs_are_connected_to_everyone()
	{
		let network=NeighboursLists::star(2,3).unwrap();
		assert!(network.is_hub(0).unwrap());
		assert!(network.is_hub(1).unwrap());
		for spoke in 2..5
		{
			assert!(!network.is_hub(spoke).unwrap());
		}
		assert!(matches!(network.is_hub(5).unwrap_err().kind,ErrorKind::UnknownAddress{address:5,num_nodes:5}));
	}
}
